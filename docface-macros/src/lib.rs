//! Procedural macros for the docface project.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derives the `Document` trait for a struct with a `String` field named
/// `id` and a `#[document(collection = "...")]` attribute.
///
/// # Example
///
/// ```ignore
/// use docface::prelude::*;
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize, Document)]
/// #[document(collection = "users")]
/// pub struct User {
///     pub id: String,
///     pub name: String,
/// }
/// ```
#[proc_macro_derive(Document, attributes(document))]
pub fn derive_document(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_document(input) {
        Ok(tokens) => tokens.into(),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_document(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let mut collection: Option<LitStr> = None;
    for attr in &input.attrs {
        if attr.path().is_ident("document") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("collection") {
                    collection = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported document attribute"))
                }
            })?;
        }
    }

    let collection = collection.ok_or_else(|| {
        syn::Error::new_spanned(
            name,
            "#[derive(Document)] requires a #[document(collection = \"...\")] attribute",
        )
    })?;

    let has_id_field = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields
                .named
                .iter()
                .any(|field| field.ident.as_ref().is_some_and(|ident| ident == "id")),
            _ => false,
        },
        _ => false,
    };

    if !has_id_field {
        return Err(syn::Error::new_spanned(
            name,
            "#[derive(Document)] requires a named `id` field",
        ));
    }

    let crate_path = core_crate_path();

    Ok(quote! {
        impl #crate_path::document::Document for #name {
            fn id(&self) -> &str {
                &self.id
            }

            fn collection_name() -> &'static str {
                #collection
            }
        }
    })
}

/// Resolves the path to docface-core, whether the user depends on it
/// directly or through the facade crate.
fn core_crate_path() -> proc_macro2::TokenStream {
    use proc_macro_crate::{FoundCrate, crate_name};

    match crate_name("docface-core") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
            quote!(::#ident)
        }
        Err(_) => match crate_name("docface") {
            Ok(FoundCrate::Name(name)) => {
                let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
                quote!(::#ident)
            }
            _ => quote!(::docface),
        },
    }
}
