//! Type declarations.
//!
//! A type becomes a namespace object holding one constructor function per
//! variant. Constructors work with and without `new`, stamp instances with
//! a tag unique across modules (`namespace.module@type#ctor`) and record
//! their field names in `_params` so positional match patterns can find
//! fields by name. A shorthand type is its own single constructor and has
//! no namespace object.

use juice_ir::{TypeAssignment, TypeConstructor, TypeDefinition};
use tracing::debug;

use super::expr::js_name;
use crate::context::{Generator, Section};

impl Generator {
    pub(crate) fn type_declaration(&mut self, declaration: &TypeAssignment) {
        let constructors = match &declaration.definition {
            TypeDefinition::Alias(target) => {
                debug!(name = %declaration.name, %target, "skipping type alias");
                return;
            }
            TypeDefinition::Constructors(constructors) => constructors,
        };
        for ctor in constructors {
            if !ctor.is_shorthand && self.register_type(&declaration.name) {
                debug!(name = %declaration.name, "registering type");
                self.emit_type_object(&declaration.name);
            }
            self.emit_constructor(&declaration.name, ctor);
        }
    }

    fn export_prefix(&self) -> &'static str {
        if self.export_types {
            "export "
        } else {
            ""
        }
    }

    fn emit_type_object(&mut self, name: &str) {
        let text = format!(
            "{export}const {name} = Object.create(null);\n\
             {name}.prototype = {{}};\n\
             {name}.toString = function() {{\n\
             \treturn \"{name}\";\n\
             }};\n\
             {name}.to_string = {name}.toString;",
            export = self.export_prefix(),
        );
        self.emit(Section::Types, &text);
    }

    fn emit_constructor(&mut self, type_name: &str, ctor: &TypeConstructor) {
        let tag = self.type_tag(type_name, &ctor.name);
        let ctor_name = js_name(&ctor.name);
        let function_name = format!("{type_name}__{ctor_name}");
        let (access, declare) = if ctor.is_shorthand {
            let access = type_name.to_string();
            let declare = format!("{}const {access}", self.export_prefix());
            (access, declare)
        } else {
            let access = format!("{type_name}.{ctor_name}");
            (access.clone(), access)
        };

        let fields: Vec<&str> = ctor.fields.iter().map(|field| field.name.as_str()).collect();
        let properties: Vec<String> = fields
            .iter()
            .map(|field| js_name(field).into_owned())
            .collect();
        let params = properties.join(", ");
        let assignments: String = properties
            .iter()
            .map(|property| format!("\tthis.{property} = {property};\n"))
            .collect();
        let rendering = if fields.is_empty() {
            format!("{type_name}#{}", ctor.name)
        } else {
            let shown: Vec<String> = fields
                .iter()
                .zip(&properties)
                .map(|(field, property)| {
                    format!("{field}: ${{globalThis.juice.pretty(this.{property})}}")
                })
                .collect();
            format!("{type_name}#{}({})", ctor.name, shown.join(", "))
        };
        let field_list: Vec<String> = properties
            .iter()
            .map(|property| format!("\"{property}\""))
            .collect();

        let mut text = format!(
            "{declare} = function {function_name}({params}) {{\n\
             \tif (!(this instanceof {function_name})) {{\n\
             \t\treturn new {access}({params});\n\
             \t}}\n\
             {assignments}\
             \tthis._type = \"{tag}\";\n\
             \tthis.toString = function() {{\n\
             \t\treturn `{rendering}`;\n\
             \t}};\n\
             \tthis.to_string = this.toString.bind(this);\n\
             }};\n"
        );
        if !ctor.is_shorthand {
            text.push_str(&format!(
                "Object.setPrototypeOf({access}.prototype, {type_name}.prototype);\n"
            ));
        }
        text.push_str(&format!(
            "{access}._is_ctor = true;\n\
             {access}._params = [{}];\n\
             {access}._type = \"{tag}\";\n\
             {access}.toString = function() {{\n\
             \treturn \"{type_name}#{}\";\n\
             }};\n\
             {access}.to_string = {access}.toString;",
            field_list.join(", "),
            ctor.name,
        ));
        self.emit(Section::Types, &text);
    }
}
