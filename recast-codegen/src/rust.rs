//! Rust source code generator
//!
//! Converts a resolved [`Schema`] into compilable Rust source targeting the
//! `recast-event` runtime: the record struct, its slot table and checked
//! slot-write methods ([`recast_event::Record`]-shaped), and the event
//! encoder.
//!
//! Uses [`quote`] for quasi-quoting token streams and [`prettyplease`] for
//! formatting the output into idiomatic Rust.
//!
//! Callers are expected to run `recast_schema::validate` first; the emitters
//! reject unresolvable types but assume property titles are valid
//! identifiers.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use recast_schema::{
    resolve_schema, ResolvedField, ResolvedType, ScalarKind, Schema, SchemaError,
};

// ── Public API ────────────────────────────────────────────────────────────────

/// Generate a complete Rust source file from a schema.
///
/// The returned string contains the record struct, its `Record` impl (slot
/// table plus checked slot writes), and its `Encode` impl. Nothing is
/// emitted if resolution fails.
pub fn generate_rust(schema: &Schema) -> Result<String, SchemaError> {
    let fields = resolve_schema(schema)?;

    let header = format!(
        "// @generated — do not edit manually.\n\
         // Record type `{}` compiled from its schema by recast.\n\
         // Regenerate: `recast generate --schema <schema.json>`.\n\n",
        schema.title
    );

    let imports = emit_imports();
    let record_struct = emit_record_struct(schema, &fields);
    let record_impl = emit_record_impl(schema, &fields);
    let encode_impl = emit_encode_impl(schema, &fields);

    let file_tokens = quote! {
        #imports
        #record_struct
        #record_impl
        #encode_impl
    };

    let syntax_tree = syn::parse2(file_tokens).expect("generated tokens should be valid Rust");
    Ok(format!("{header}{}", prettyplease::unparse(&syntax_tree)))
}

/// Generate the source file plus its round-trip test module (see
/// [`crate::fixture::generate_tests`]) as one document.
pub fn generate_rust_with_tests(schema: &Schema) -> Result<String, SchemaError> {
    let source = generate_rust(schema)?;
    let tests = crate::fixture::generate_tests(schema)?;
    Ok(format!("{source}\n{tests}"))
}

// ── Imports ──────────────────────────────────────────────────────────────────

fn emit_imports() -> TokenStream {
    quote! {
        use recast_event::{
            Encode, EventSink, Record, ScalarKind, ScalarValue, Slot, SlotSpec, TypeMismatch,
        };
    }
}

// ── Record struct ────────────────────────────────────────────────────────────

fn emit_record_struct(schema: &Schema, fields: &[ResolvedField]) -> TokenStream {
    let struct_name = format_ident!("{}", schema.title);
    let doc = format!("Record type `{}`, generated from its schema.", schema.title);

    let field_defs: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let name = format_ident!("{}", field.name);
            let ty = type_tokens(&field.ty);
            quote! { pub #name: #ty, }
        })
        .collect();

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct #struct_name {
            #(#field_defs)*
        }
    }
}

fn type_tokens(ty: &ResolvedType) -> TokenStream {
    match ty {
        ResolvedType::Scalar(ScalarKind::Int) => quote! { i32 },
        ResolvedType::Scalar(ScalarKind::Double) => quote! { f64 },
        ResolvedType::Scalar(ScalarKind::Bool) => quote! { bool },
        ResolvedType::Scalar(ScalarKind::Text) => quote! { String },
        ResolvedType::Sequence(element) => {
            let inner = type_tokens(element);
            quote! { Vec<#inner> }
        }
    }
}

fn kind_tokens(kind: ScalarKind) -> TokenStream {
    match kind {
        ScalarKind::Int => quote! { ScalarKind::Int },
        ScalarKind::Double => quote! { ScalarKind::Double },
        ScalarKind::Bool => quote! { ScalarKind::Bool },
        ScalarKind::Text => quote! { ScalarKind::Text },
    }
}

fn scalar_kind_of(ty: &ResolvedType) -> ScalarKind {
    match ty {
        ResolvedType::Scalar(kind) => *kind,
        ResolvedType::Sequence(element) => scalar_kind_of(element),
    }
}

// ── Record impl ──────────────────────────────────────────────────────────────

fn emit_record_impl(schema: &Schema, fields: &[ResolvedField]) -> TokenStream {
    let struct_name = format_ident!("{}", schema.title);

    let slot_specs: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let name = &field.name;
            let kind = kind_tokens(scalar_kind_of(&field.ty));
            if field.ty.is_sequence() {
                quote! { SlotSpec::sequence(#name, #kind), }
            } else {
                quote! { SlotSpec::scalar(#name, #kind), }
            }
        })
        .collect();

    let write_fn = emit_write_scalar(fields);
    let append_fn = emit_append_scalar(fields);
    let begin_fn = emit_begin_sequence(fields);

    quote! {
        impl Record for #struct_name {
            fn slots() -> &'static [SlotSpec] {
                const SLOTS: &[SlotSpec] = &[
                    #(#slot_specs)*
                ];
                SLOTS
            }

            #write_fn
            #append_fn
            #begin_fn
        }
    }
}

fn conversion_ident(kind: ScalarKind) -> proc_macro2::Ident {
    match kind {
        ScalarKind::Int => format_ident!("into_int"),
        ScalarKind::Double => format_ident!("into_double"),
        ScalarKind::Bool => format_ident!("into_bool"),
        ScalarKind::Text => format_ident!("into_text"),
    }
}

fn emit_write_scalar(fields: &[ResolvedField]) -> TokenStream {
    let arms: Vec<TokenStream> = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.ty.is_sequence())
        .map(|(ordinal, field)| {
            let ordinal = Literal::u16_unsuffixed(ordinal as u16);
            let ident = format_ident!("{}", field.name);
            let name = &field.name;
            let convert = conversion_ident(scalar_kind_of(&field.ty));
            quote! { #ordinal => self.#ident = value.#convert(#name)?, }
        })
        .collect();

    if arms.is_empty() {
        return quote! {
            fn write_scalar(&mut self, slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch> {
                let _ = value;
                unreachable!("no scalar slot {}", slot.id.0)
            }
        };
    }

    quote! {
        fn write_scalar(&mut self, slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch> {
            match slot.id.0 {
                #(#arms)*
                _ => unreachable!("no scalar slot {}", slot.id.0),
            }
            Ok(())
        }
    }
}

fn emit_append_scalar(fields: &[ResolvedField]) -> TokenStream {
    let arms: Vec<TokenStream> = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.ty.is_sequence())
        .map(|(ordinal, field)| {
            let ordinal = Literal::u16_unsuffixed(ordinal as u16);
            let ident = format_ident!("{}", field.name);
            let name = &field.name;
            let convert = conversion_ident(scalar_kind_of(&field.ty));
            quote! { #ordinal => self.#ident.push(value.#convert(#name)?), }
        })
        .collect();

    if arms.is_empty() {
        return quote! {
            fn append_scalar(&mut self, slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch> {
                let _ = value;
                unreachable!("no sequence slot {}", slot.id.0)
            }
        };
    }

    quote! {
        fn append_scalar(&mut self, slot: Slot, value: ScalarValue) -> Result<(), TypeMismatch> {
            match slot.id.0 {
                #(#arms)*
                _ => unreachable!("no sequence slot {}", slot.id.0),
            }
            Ok(())
        }
    }
}

fn emit_begin_sequence(fields: &[ResolvedField]) -> TokenStream {
    let arms: Vec<TokenStream> = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.ty.is_sequence())
        .map(|(ordinal, field)| {
            let ordinal = Literal::u16_unsuffixed(ordinal as u16);
            let ident = format_ident!("{}", field.name);
            quote! { #ordinal => self.#ident.clear(), }
        })
        .collect();

    quote! {
        fn begin_sequence(&mut self, slot: Slot) {
            match slot.id.0 {
                #(#arms)*
                _ => {}
            }
        }
    }
}

// ── Encode impl ──────────────────────────────────────────────────────────────

fn emit_encode_impl(schema: &Schema, fields: &[ResolvedField]) -> TokenStream {
    let struct_name = format_ident!("{}", schema.title);

    let field_blocks: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let ident = format_ident!("{}", field.name);
            let name = &field.name;
            match &field.ty {
                ResolvedType::Scalar(kind) => {
                    let value = scalar_value_tokens(*kind, quote! { self.#ident });
                    quote! {
                        sink.key(#name);
                        sink.value(#value);
                    }
                }
                ResolvedType::Sequence(element) => {
                    let value = element_value_tokens(scalar_kind_of(element));
                    quote! {
                        sink.key(#name);
                        sink.start_array();
                        for item in &self.#ident {
                            sink.value(#value);
                        }
                        sink.end_array();
                    }
                }
            }
        })
        .collect();

    quote! {
        impl Encode for #struct_name {
            fn encode<S: EventSink>(&self, sink: &mut S) {
                sink.start_object();
                #(#field_blocks)*
                sink.end_object();
            }
        }
    }
}

/// Wrap a field access in the right `ScalarValue` constructor.
/// Text fields are cloned; everything else is `Copy`.
fn scalar_value_tokens(kind: ScalarKind, access: TokenStream) -> TokenStream {
    match kind {
        ScalarKind::Int => quote! { ScalarValue::Int(#access) },
        ScalarKind::Double => quote! { ScalarValue::Double(#access) },
        ScalarKind::Bool => quote! { ScalarValue::Bool(#access) },
        ScalarKind::Text => quote! { ScalarValue::Text(#access.clone()) },
    }
}

/// Value constructor for one borrowed sequence element named `item`.
fn element_value_tokens(kind: ScalarKind) -> TokenStream {
    match kind {
        ScalarKind::Int => quote! { ScalarValue::Int(*item) },
        ScalarKind::Double => quote! { ScalarValue::Double(*item) },
        ScalarKind::Bool => quote! { ScalarValue::Bool(*item) },
        ScalarKind::Text => quote! { ScalarValue::Text(item.clone()) },
    }
}

// ── Utilities ─────────────────────────────────────────────────────────────────

/// Convert a PascalCase string to snake_case.
///
/// Each uppercase letter starts a new word, so runs of capitals split
/// letter by letter (`"XMLData"` → `"x_m_l_data"`). Schema titles are
/// expected to be plain PascalCase; validation warns otherwise.
///
/// # Examples
/// ```
/// # use recast_codegen::rust::to_snake_case;
/// assert_eq!(to_snake_case("WeatherReport"), "weather_report");
/// assert_eq!(to_snake_case("Point"), "point");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        for lc in c.to_lowercase() {
            result.push(lc);
        }
    }
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use recast_schema::ResolveError;

    const POINT_JSON: &str = r#"
    {
        "title": "Point",
        "properties": {
            "x": { "title": "x", "type": "integer" },
            "y": { "title": "y", "type": "integer" },
            "tags": {
                "title": "tags",
                "type": "array",
                "items": { "type": "string" }
            }
        }
    }
    "#;

    const WEATHER_JSON: &str = r#"
    {
        "title": "WeatherReport",
        "properties": {
            "station": { "title": "station", "type": "string" },
            "celsius": { "title": "celsius", "type": "number" },
            "raining": { "title": "raining", "type": "boolean" },
            "samples": {
                "title": "samples",
                "type": "array",
                "items": { "type": "number" }
            }
        }
    }
    "#;

    fn point() -> Schema {
        Schema::from_json(POINT_JSON).unwrap()
    }

    fn generated() -> String {
        generate_rust(&point()).unwrap()
    }

    #[test]
    fn has_generated_header() {
        let out = generated();
        assert!(
            out.contains("@generated"),
            "Missing @generated header:\n{out}"
        );
    }

    #[test]
    fn has_runtime_imports() {
        let out = generated();
        assert!(
            out.contains("use recast_event::"),
            "Missing recast_event import:\n{out}"
        );
    }

    #[test]
    fn record_struct_generated() {
        let out = generated();
        assert!(
            out.contains("pub struct Point"),
            "Missing Point struct:\n{out}"
        );
        assert!(out.contains("pub x: i32,"), "Missing x field:\n{out}");
        assert!(out.contains("pub y: i32,"), "Missing y field:\n{out}");
        assert!(
            out.contains("pub tags: Vec<String>,"),
            "Missing tags field:\n{out}"
        );
        assert!(
            out.contains("#[derive(Debug, Clone, Default, PartialEq)]"),
            "Missing derives:\n{out}"
        );
    }

    #[test]
    fn slot_table_in_declaration_order() {
        let out = generated();
        let x = out
            .find(r#"SlotSpec::scalar("x", ScalarKind::Int)"#)
            .expect("missing x slot");
        let y = out
            .find(r#"SlotSpec::scalar("y", ScalarKind::Int)"#)
            .expect("missing y slot");
        let tags = out
            .find(r#"SlotSpec::sequence("tags", ScalarKind::Text)"#)
            .expect("missing tags slot");
        assert!(x < y && y < tags, "slots out of order:\n{out}");
    }

    #[test]
    fn write_scalar_dispatches_by_ordinal() {
        let out = generated();
        assert!(
            out.contains(r#"self.x = value.into_int("x")?"#),
            "Missing x write arm:\n{out}"
        );
        assert!(
            out.contains(r#"self.y = value.into_int("y")?"#),
            "Missing y write arm:\n{out}"
        );
    }

    #[test]
    fn sequence_methods_generated() {
        let out = generated();
        assert!(
            out.contains(r#"self.tags.push(value.into_text("tags")?)"#),
            "Missing append arm:\n{out}"
        );
        assert!(
            out.contains("self.tags.clear()"),
            "Missing begin_sequence arm:\n{out}"
        );
    }

    #[test]
    fn encode_impl_generated() {
        let out = generated();
        assert!(
            out.contains("impl Encode for Point"),
            "Missing Encode impl:\n{out}"
        );
        assert!(
            out.contains(r#"sink.key("x")"#),
            "Missing x key emission:\n{out}"
        );
        assert!(
            out.contains("ScalarValue::Int(self.x)"),
            "Missing x value emission:\n{out}"
        );
        assert!(
            out.contains(r#"sink.key("tags")"#),
            "Missing tags key emission:\n{out}"
        );
        assert!(
            out.contains("sink.start_array()"),
            "Missing array start:\n{out}"
        );
    }

    #[test]
    fn all_scalar_kinds_map_to_host_types() {
        let out = generate_rust(&Schema::from_json(WEATHER_JSON).unwrap()).unwrap();
        assert!(
            out.contains("pub station: String,"),
            "Missing string field:\n{out}"
        );
        assert!(
            out.contains("pub celsius: f64,"),
            "Missing double field:\n{out}"
        );
        assert!(
            out.contains("pub raining: bool,"),
            "Missing bool field:\n{out}"
        );
        assert!(
            out.contains("pub samples: Vec<f64>,"),
            "Missing double sequence field:\n{out}"
        );
        assert!(
            out.contains("ScalarValue::Text(self.station.clone())"),
            "String fields must clone on encode:\n{out}"
        );
    }

    #[test]
    fn nested_array_aborts_generation() {
        let json = r#"
        {
            "title": "Grid",
            "properties": {
                "rows": {
                    "title": "rows",
                    "type": "array",
                    "items": { "type": "array", "items": { "type": "integer" } }
                }
            }
        }
        "#;
        let schema = Schema::from_json(json).unwrap();
        match generate_rust(&schema) {
            Err(SchemaError::Resolve(ResolveError::UnsupportedNesting { field })) => {
                assert_eq!(field, "rows");
            }
            other => panic!("expected UnsupportedNesting, got {other:?}"),
        }
    }

    #[test]
    fn missing_items_aborts_generation() {
        let json = r#"
        {
            "title": "Bad",
            "properties": {
                "tags": { "title": "tags", "type": "array" }
            }
        }
        "#;
        let schema = Schema::from_json(json).unwrap();
        assert!(matches!(
            generate_rust(&schema),
            Err(SchemaError::Resolve(ResolveError::MissingItems { .. }))
        ));
    }

    #[test]
    fn with_tests_appends_test_module() {
        let out = generate_rust_with_tests(&point()).unwrap();
        assert!(
            out.contains("pub struct Point"),
            "Missing struct in combined output:\n{out}"
        );
        assert!(
            out.contains("mod tests"),
            "Missing test module in combined output:\n{out}"
        );
    }

    // ── to_snake_case ───────────────────────────────────────────────────────

    #[test]
    fn snake_case_basic() {
        assert_eq!(to_snake_case("WeatherReport"), "weather_report");
        assert_eq!(to_snake_case("Point"), "point");
        assert_eq!(to_snake_case("x"), "x");
    }

    #[test]
    fn snake_case_splits_capital_runs() {
        assert_eq!(to_snake_case("XMLData"), "x_m_l_data");
    }
}
