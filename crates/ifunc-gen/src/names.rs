//! Parameter naming for generated adapters.

use ifunc_ir::{Field, TypeExpr};
use std::collections::HashMap;
use tracing::{trace, warn};

/// Name used when nothing better can be derived from a type.
pub const FALLBACK_NAME: &str = "v";

/// Derive a local variable name from a parameter type.
///
/// `[]byte` gives `bytes`, `map[string]Widget` gives `widgets`, `*Request`
/// gives `request` and `context.Context` gives `ctx`. Shapes with no obvious
/// name fall back to `v`.
pub fn infer_param_name(ty: &TypeExpr) -> String {
    match ty {
        TypeExpr::Slice(elem) | TypeExpr::Array { elem, .. } => infer_param_name(elem) + "s",
        TypeExpr::Map { value, .. } => infer_param_name(value) + "s",
        TypeExpr::Pointer(inner) => infer_param_name(inner),
        TypeExpr::Ident(name) => unexported(name),
        TypeExpr::Qualified { package, name } => {
            if package == "context" && name == "Context" {
                "ctx".to_string()
            } else {
                unexported(name)
            }
        }
        _ => FALLBACK_NAME.to_string(),
    }
}

/// Lower-case the leading capitalised run of `name`.
///
/// `Request` becomes `request`, `HTTPBody` becomes `httpBody` and `URL`
/// becomes `url`.
pub fn unexported(name: &str) -> String {
    let mut prev = 0;
    for (pos, ch) in name.char_indices() {
        if ch.is_lowercase() {
            let split = if prev == 0 { pos } else { prev };
            return name[..split].to_lowercase() + &name[split..];
        }
        prev = pos;
    }
    name.to_lowercase()
}

/// Rename parameters until no two share a name.
///
/// Within a pass, the second occurrence of a name suffixes both the first
/// occurrence (`1`) and itself (`2`); later occurrences get their own count.
/// Renaming can create fresh collisions (`v` becoming `v1` next to an
/// existing `v1`), so passes repeat until one makes no change.
///
/// Returns the number of passes run, including the final clean one.
pub fn deduplicate_names(fields: &mut [Field]) -> usize {
    let total: usize = fields.iter().map(|f| f.names.len()).sum();
    let max_passes = 4 * total + 4;

    let mut passes = 0;
    loop {
        passes += 1;
        if !renumber_pass(fields) {
            return passes;
        }
        if passes >= max_passes {
            warn!(passes, "parameter names did not settle, leaving duplicates");
            return passes;
        }
    }
}

/// One renumbering pass. Returns true if anything was renamed.
fn renumber_pass(fields: &mut [Field]) -> bool {
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut first_seen: HashMap<String, (usize, usize)> = HashMap::new();
    let mut changed = false;

    for i in 0..fields.len() {
        for j in 0..fields[i].names.len() {
            let name = fields[i].names[j].clone();
            let count = occurrences.entry(name.clone()).or_insert(0);
            *count += 1;
            let count = *count;

            match count {
                1 => {
                    first_seen.insert(name, (i, j));
                }
                2 => {
                    if let Some((fi, fj)) = first_seen.remove(&name) {
                        fields[fi].names[fj].push('1');
                    }
                    fields[i].names[j].push_str(&count.to_string());
                    changed = true;
                }
                _ => {
                    fields[i].names[j].push_str(&count.to_string());
                    changed = true;
                }
            }
        }
    }

    if changed {
        trace!(names = ?fields.iter().flat_map(|f| &f.names).collect::<Vec<_>>(), "renumbered");
    }
    changed
}
