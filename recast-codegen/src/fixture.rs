//! Round-trip test harness generator
//!
//! Emits a `#[cfg(test)]` module to sit next to a generated record: a
//! seeded random fixture constructor per the schema's field types, an
//! encode→decode round-trip assertion over the in-memory event buffer, and
//! the same round trip through the JSON byte binding.
//!
//! Fixture randomness always flows through an explicit `rand::Rng`
//! parameter seeded at the call site — never a process-wide source — so a
//! failing run is reproducible from its seed.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use recast_schema::{resolve_schema, ResolvedField, ResolvedType, ScalarKind, Schema, SchemaError};

use crate::rust::to_snake_case;

/// Seed baked into the generated tests. Arbitrary but stable: regenerating
/// must not change which instances the tests exercise.
const FIXTURE_SEED: u64 = 0x5eed_cafe;

/// Generate the round-trip test module for a schema.
///
/// The output is a complete `#[cfg(test)] mod tests { .. }` item intended
/// to be appended to the generated source file (see
/// [`crate::rust::generate_rust_with_tests`]).
pub fn generate_tests(schema: &Schema) -> Result<String, SchemaError> {
    let fields = resolve_schema(schema)?;

    let struct_name = format_ident!("{}", schema.title);
    let snake = to_snake_case(&schema.title);
    let sample_fn = format_ident!("sample_{snake}");
    let seed = Literal::u64_unsuffixed(FIXTURE_SEED);

    let field_inits: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let ident = format_ident!("{}", field.name);
            let value = fixture_expr(&field.ty);
            quote! { #ident: #value, }
        })
        .collect();

    let random_text_fn = if needs_random_text(&fields) {
        quote! {
            fn random_text<R: Rng>(rng: &mut R) -> String {
                const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
                (0..10)
                    .map(|_| char::from(LETTERS[rng.gen_range(0..LETTERS.len())]))
                    .collect()
            }
        }
    } else {
        quote! {}
    };

    let event_test = format_ident!("{snake}_event_round_trip");
    let json_test = format_ident!("{snake}_json_round_trip");

    let empty_sequence_test = emit_empty_sequence_test(&struct_name, &sample_fn, &snake, &fields);

    let module = quote! {
        #[cfg(test)]
        mod tests {
            use super::*;
            use rand::rngs::StdRng;
            use rand::{Rng, SeedableRng};
            use recast_event::json::{json_to_events, JsonSink};
            use recast_event::{decode_events, Encode, EventBuffer};

            fn #sample_fn<R: Rng>(rng: &mut R) -> #struct_name {
                #struct_name {
                    #(#field_inits)*
                }
            }

            #random_text_fn

            #[test]
            fn #event_test() {
                let mut rng = StdRng::seed_from_u64(#seed);
                let original = #sample_fn(&mut rng);
                let mut sink = EventBuffer::new();
                original.encode(&mut sink);
                let decoded: #struct_name = decode_events(sink.into_events()).expect("decode");
                assert_eq!(original, decoded);
            }

            #[test]
            fn #json_test() {
                let mut rng = StdRng::seed_from_u64(#seed);
                let original = #sample_fn(&mut rng);
                let mut sink = JsonSink::new();
                original.encode(&mut sink);
                let events = json_to_events(&sink.into_string()).expect("parse");
                let decoded: #struct_name = decode_events(events).expect("decode");
                assert_eq!(original, decoded);
            }

            #empty_sequence_test
        }
    };

    let syntax_tree = syn::parse2(module).expect("generated tokens should be valid Rust");
    Ok(prettyplease::unparse(&syntax_tree))
}

// ── Fixture expressions ──────────────────────────────────────────────────────

/// Random value expression for one resolved type, drawing from `rng`.
/// Numbers are uniform in `[0, 1024]`, strings are 10 lowercase letters,
/// sequences carry 10 elements.
fn fixture_expr(ty: &ResolvedType) -> TokenStream {
    match ty {
        ResolvedType::Scalar(ScalarKind::Int) => quote! { rng.gen_range(0..=1024) },
        ResolvedType::Scalar(ScalarKind::Double) => quote! { rng.gen_range(0.0..=1024.0) },
        ResolvedType::Scalar(ScalarKind::Bool) => quote! { rng.gen_bool(0.5) },
        ResolvedType::Scalar(ScalarKind::Text) => quote! { random_text(rng) },
        ResolvedType::Sequence(element) => {
            let element_expr = fixture_expr(element);
            quote! { (0..10).map(|_| #element_expr).collect() }
        }
    }
}

fn needs_random_text(fields: &[ResolvedField]) -> bool {
    fn has_text(ty: &ResolvedType) -> bool {
        match ty {
            ResolvedType::Scalar(kind) => *kind == ScalarKind::Text,
            ResolvedType::Sequence(element) => has_text(element),
        }
    }
    fields.iter().any(|field| has_text(&field.ty))
}

/// Sequence boundary check: empty sequences must round-trip to empty, not
/// error. Only emitted when the record has sequence fields.
fn emit_empty_sequence_test(
    struct_name: &proc_macro2::Ident,
    sample_fn: &proc_macro2::Ident,
    snake: &str,
    fields: &[ResolvedField],
) -> TokenStream {
    let clears: Vec<TokenStream> = fields
        .iter()
        .filter(|field| field.ty.is_sequence())
        .map(|field| {
            let ident = format_ident!("{}", field.name);
            quote! { original.#ident = Vec::new(); }
        })
        .collect();

    if clears.is_empty() {
        return quote! {};
    }

    let seed = Literal::u64_unsuffixed(FIXTURE_SEED);
    let test_name = format_ident!("{snake}_empty_sequences_round_trip");

    quote! {
        #[test]
        fn #test_name() {
            let mut rng = StdRng::seed_from_u64(#seed);
            let mut original = #sample_fn(&mut rng);
            #(#clears)*
            let mut sink = EventBuffer::new();
            original.encode(&mut sink);
            let decoded: #struct_name = decode_events(sink.into_events()).expect("decode");
            assert_eq!(original, decoded);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
