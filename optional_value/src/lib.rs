use proc_macro::TokenStream;
use syn::{parse_quote, Attribute};

#[proc_macro_attribute]
/// Given a payload struct, adds Clone, Debug and serde's Serialize.
///
/// Property lists have no notion of null, and the plist crate encodes
/// `Option<T>` as a single-key dictionary. Devices reject both, so every
/// `Option<T>` field is serialized as its inner value and skipped when `None`.
///
/// `Vec<T>` fields marked `#[omit_empty]` are skipped when empty. Other collections,
/// such as a profile's `PayloadContent`, are always emitted.
pub fn payload(_metadata: TokenStream, item: TokenStream) -> TokenStream {
    let mut ast: syn::DeriveInput = syn::parse(item).unwrap();

    let syn::Data::Struct(ref old_struct) = ast.data else {
        panic!("#[payload] should only be applied on structs.")
    };

    let mut current_struct = old_struct.clone();

    for field in current_struct.fields.iter_mut() {
        // Our marker is not a real attribute, so it must not survive expansion.
        let omit_empty = field.attrs.iter().any(|a| a.path().is_ident("omit_empty"));
        field.attrs.retain(|a| !a.path().is_ident("omit_empty"));

        if omit_empty {
            let serialize_attr: Attribute = parse_quote!(
                #[serde(skip_serializing_if = "Vec::is_empty")]
            );
            field.attrs.push(serialize_attr);
            continue;
        }

        let syn::Type::Path(field_path) = &field.ty else {
            continue;
        };

        // We only look at the last path segment, so that both
        // `Option<T>` and `std::option::Option<T>` are handled.
        let Some(last_segment) = field_path.path.segments.last() else {
            // The user may still be typing. Silently ignore.
            continue;
        };

        if last_segment.ident != "Option" {
            continue;
        }

        let serialize_attr: Attribute = parse_quote!(
            #[serde(
                serialize_with = "crate::payloads::ser::serialize_option_some",
                skip_serializing_if = "Option::is_none"
            )]
        );
        field.attrs.push(serialize_attr);
    }

    ast.data = syn::Data::Struct(current_struct);

    let output: proc_macro2::TokenStream = parse_quote! {
        #[derive(Clone, Debug, serde::Serialize)]
        #ast
    };
    output.into()
}
