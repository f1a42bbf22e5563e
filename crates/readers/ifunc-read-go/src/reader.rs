//! Tree-sitter based Go reader.

use ifunc_ir::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },
}

/// Parse every `.go` file in `dir` (not recursing) and group the files into
/// packages by their `package` clause.
pub fn read_dir(dir: impl AsRef<Path>) -> Result<Program, ReadError> {
    let dir = dir.as_ref();
    let io_err = |source| ReadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "go") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut program = Program::new();
    for path in paths {
        let source = fs::read_to_string(&path).map_err(|source| ReadError::Io {
            path: path.clone(),
            source,
        })?;
        let file = read(&path, &source)?;
        debug!(file = %path.display(), package = %file.package, objects = file.scope.objects.len(), "read");
        program.add_file(path, file);
    }
    Ok(program)
}

/// Parse one Go source file. `path` is only used in error messages.
pub fn read(path: impl AsRef<Path>, source: &str) -> Result<File, ReadError> {
    let mut parser = Parser::new();
    let language = tree_sitter_go::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|err| ReadError::Parse(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ReadError::Parse("failed to parse".into()))?;

    let ctx = ReadContext::new(path.as_ref(), source);
    ctx.read_file(&tree)
}

struct ReadContext<'a> {
    path: &'a Path,
    source: &'a str,
}

impl<'a> ReadContext<'a> {
    fn new(path: &'a Path, source: &'a str) -> Self {
        Self { path, source }
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>, ReadError> {
        node.child_by_field_name(name).ok_or_else(|| {
            ReadError::Parse(format!("{} missing {}", node.kind(), name))
        })
    }

    fn read_file(&self, tree: &Tree) -> Result<File, ReadError> {
        let root = tree.root_node();

        if root.has_error() {
            let pos = first_error(root).unwrap_or(root).start_position();
            return Err(ReadError::Parse(format!(
                "syntax error in {} at {}:{}",
                self.path.display(),
                pos.row + 1,
                pos.column + 1
            )));
        }

        let mut package = None;
        let mut scope = Scope::default();
        let mut cursor = root.walk();

        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => {
                    let name = child.named_child(0).ok_or_else(|| {
                        ReadError::Parse("package_clause missing name".into())
                    })?;
                    package = Some(self.node_text(name).to_string());
                }
                "type_declaration" => self.read_type_declaration(child, &mut scope)?,
                "function_declaration" => {
                    let func = self.read_function_declaration(child)?;
                    scope.insert(func.name.clone(), Binding::Func(func));
                }
                "var_declaration" => self.read_value_declaration(child, &mut scope, false),
                "const_declaration" => self.read_value_declaration(child, &mut scope, true),
                // Methods are not scope objects; imports and comments are skipped.
                _ => {}
            }
        }

        let package = package.ok_or_else(|| {
            ReadError::Parse(format!("{} has no package clause", self.path.display()))
        })?;
        Ok(File { package, scope })
    }

    fn read_type_declaration(&self, node: Node, scope: &mut Scope) -> Result<(), ReadError> {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            let alias = match child.kind() {
                "type_spec" => false,
                "type_alias" => true,
                _ => continue,
            };
            let name = self.node_text(self.field(child, "name")?).to_string();
            let type_params = match child.child_by_field_name("type_parameters") {
                Some(params) => self.read_type_parameters(params)?,
                None => Vec::new(),
            };
            let ty = self.read_type(self.field(child, "type")?)?;
            scope.insert(
                name.clone(),
                Binding::Type(TypeSpec {
                    name,
                    type_params,
                    ty,
                    alias,
                }),
            );
        }
        Ok(())
    }

    fn read_type_parameters(&self, node: Node) -> Result<Vec<Field>, ReadError> {
        let mut params = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() != "type_parameter_declaration" {
                continue;
            }
            let names = self.field_names(child);
            let constraint = self.field(child, "type")?;
            params.push(Field::new(names, TypeExpr::raw(self.node_text(constraint))));
        }
        Ok(params)
    }

    fn read_function_declaration(&self, node: Node) -> Result<FuncDecl, ReadError> {
        let name = self.node_text(self.field(node, "name")?);
        let signature = self.read_signature(node)?;
        Ok(FuncDecl::new(name, signature))
    }

    fn read_value_declaration(&self, node: Node, scope: &mut Scope, constant: bool) {
        let mut names = Vec::new();
        self.collect_value_names(node, &mut names);
        for name in names {
            let binding = if constant {
                Binding::Const(name.clone())
            } else {
                Binding::Var(name.clone())
            };
            scope.insert(name, binding);
        }
    }

    /// Names bound by `var`/`const` specs, including grouped `( ... )` forms.
    fn collect_value_names(&self, node: Node, names: &mut Vec<String>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "var_spec" | "const_spec" => names.extend(self.field_names(child)),
                "var_spec_list" => self.collect_value_names(child, names),
                _ => {}
            }
        }
    }

    fn field_names(&self, node: Node) -> Vec<String> {
        let mut cursor = node.walk();
        node.children_by_field_name("name", &mut cursor)
            .filter(|n| n.is_named())
            .map(|n| self.node_text(n).to_string())
            .collect()
    }

    /// Parameters and results of a function, method or function type.
    fn read_signature(&self, node: Node) -> Result<FuncType, ReadError> {
        let params = self.read_parameter_list(self.field(node, "parameters")?)?;
        let results = match node.child_by_field_name("result") {
            None => None,
            Some(result) if result.kind() == "parameter_list" => {
                Some(self.read_parameter_list(result)?)
            }
            Some(result) => Some(vec![Field::unnamed(self.read_type(result)?)]),
        };
        Ok(FuncType::new(params, results))
    }

    fn read_parameter_list(&self, node: Node) -> Result<Vec<Field>, ReadError> {
        if node.kind() != "parameter_list" {
            return Err(ReadError::UnexpectedNode {
                expected: "parameter_list".into(),
                got: node.kind().into(),
            });
        }

        let mut fields = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "parameter_declaration" => {
                    let ty = self.read_type(self.field(child, "type")?)?;
                    fields.push(Field::new(self.field_names(child), ty));
                }
                "variadic_parameter_declaration" => {
                    let ty = self.read_type(self.field(child, "type")?)?;
                    fields.push(Field::new(self.field_names(child), TypeExpr::variadic(ty)));
                }
                _ => {}
            }
        }
        Ok(fields)
    }

    fn read_type(&self, node: Node) -> Result<TypeExpr, ReadError> {
        match node.kind() {
            "type_identifier" => Ok(TypeExpr::ident(self.node_text(node))),

            "qualified_type" => {
                let package = self.node_text(self.field(node, "package")?);
                let name = self.node_text(self.field(node, "name")?);
                Ok(TypeExpr::qualified(package, name))
            }

            "pointer_type" => {
                let inner = node
                    .named_child(0)
                    .ok_or_else(|| ReadError::Parse("pointer_type missing type".into()))?;
                Ok(TypeExpr::pointer(self.read_type(inner)?))
            }

            "slice_type" => Ok(TypeExpr::slice(self.read_type(self.field(node, "element")?)?)),

            "array_type" => {
                let len = self.node_text(self.field(node, "length")?);
                let elem = self.read_type(self.field(node, "element")?)?;
                Ok(TypeExpr::array(len, elem))
            }

            "implicit_length_array_type" => {
                Ok(TypeExpr::array("...", self.read_type(self.field(node, "element")?)?))
            }

            "map_type" => {
                let key = self.read_type(self.field(node, "key")?)?;
                let value = self.read_type(self.field(node, "value")?)?;
                Ok(TypeExpr::map(key, value))
            }

            "channel_type" => {
                let text = self.node_text(node);
                let dir = if text.starts_with("<-") {
                    ChanDir::Recv
                } else if text["chan".len().min(text.len())..]
                    .trim_start()
                    .starts_with("<-")
                {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.read_type(self.field(node, "value")?)?;
                Ok(TypeExpr::chan(dir, elem))
            }

            "function_type" => Ok(TypeExpr::Func(self.read_signature(node)?)),

            "interface_type" => self.read_interface(node),

            "generic_type" => {
                let base = self.read_type(self.field(node, "type")?)?;
                let args_node = self.field(node, "type_arguments")?;
                let mut args = Vec::new();
                let mut cursor = args_node.walk();
                for arg in args_node.named_children(&mut cursor) {
                    args.push(self.read_type_elem(arg)?);
                }
                Ok(TypeExpr::generic(base, args))
            }

            "parenthesized_type" => {
                let inner = node
                    .named_child(0)
                    .ok_or_else(|| ReadError::Parse("parenthesized_type missing type".into()))?;
                Ok(TypeExpr::paren(self.read_type(inner)?))
            }

            // Struct literals, negated types and anything newer are kept as written.
            _ => Ok(TypeExpr::raw(self.node_text(node))),
        }
    }

    /// A `type_elem` holds one type or a `|` union; unions are kept verbatim.
    fn read_type_elem(&self, node: Node) -> Result<TypeExpr, ReadError> {
        if node.kind() != "type_elem" {
            return self.read_type(node);
        }
        if node.named_child_count() == 1 {
            if let Some(inner) = node.named_child(0) {
                return self.read_type(inner);
            }
        }
        Ok(TypeExpr::raw(self.node_text(node)))
    }

    fn read_interface(&self, node: Node) -> Result<TypeExpr, ReadError> {
        let mut methods = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "method_elem" | "method_spec" => {
                    let name = self.node_text(self.field(child, "name")?);
                    methods.push(Field::method(name, self.read_signature(child)?));
                }
                "type_elem" | "constraint_elem" | "interface_type_name" => {
                    methods.push(Field::unnamed(self.read_type_elem(child)?));
                }
                _ => {}
            }
        }
        Ok(TypeExpr::interface(methods))
    }
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}
