//! Procedural macros for SHSF serverless functions.
//!
//! This crate provides the `#[shsf_function]` attribute macro, which turns a
//! plain entry-point function into a type that can be registered with a
//! function registry.
//!
//! # Example
//!
//! ```ignore
//! use shsf::prelude::*;
//! use serde_json::Value;
//!
//! #[shsf_function(id = "hello", version = "v1", description = "Says hello")]
//! fn hello(arg: &Value) -> Result<Envelope, InternalFault> {
//!     Ok(Envelope::passthrough(StatusCode::OK, arg.clone()))
//! }
//!
//! // Generates `HelloFunction` and `HELLO_MANIFEST`.
//! ```

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, punctuated::Punctuated, Expr, ExprLit, FnArg, ItemFn, Lit, Meta, Token,
};

/// Attributes for the `#[shsf_function]` macro.
#[derive(Default, Debug)]
struct ShsfFunctionAttrs {
    /// Function identifier.
    id: Option<String>,
    /// Function version.
    version: Option<String>,
    /// Optional description.
    description: Option<String>,
}

impl ShsfFunctionAttrs {
    fn parse_meta_list(metas: Punctuated<Meta, Token![,]>) -> syn::Result<Self> {
        let mut attrs = ShsfFunctionAttrs::default();

        for meta in metas {
            let nv = match meta {
                Meta::NameValue(nv) => nv,
                other => return Err(syn::Error::new_spanned(other, "expected name = value")),
            };

            let ident = nv
                .path
                .get_ident()
                .ok_or_else(|| syn::Error::new_spanned(&nv.path, "expected identifier"))?
                .to_string();

            let value = match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit_str),
                    ..
                }) => lit_str.value(),
                _ => return Err(syn::Error::new_spanned(&nv.value, "expected string literal")),
            };

            match ident.as_str() {
                "id" => attrs.id = Some(value),
                "version" => attrs.version = Some(value),
                "description" => attrs.description = Some(value),
                _ => {
                    return Err(syn::Error::new_spanned(
                        nv.path,
                        format!("unknown attribute: {}", ident),
                    ));
                }
            }
        }

        Ok(attrs)
    }
}

/// The `#[shsf_function]` attribute macro for defining SHSF functions.
///
/// Apply it to a synchronous `fn(&Value) -> Result<Envelope, InternalFault>`.
/// The macro keeps the function and generates a unit struct named after it
/// (`fn data_echo` becomes `DataEchoFunction`) implementing `ShsfFunction`,
/// plus a `DATA_ECHO_MANIFEST` static.
///
/// # Attributes
///
/// - `id` (required): Unique identifier, also the registered name
/// - `version` (optional): Function version (default: "v1")
/// - `description` (optional): Function description
#[proc_macro_attribute]
pub fn shsf_function(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args with Punctuated::<Meta, Token![,]>::parse_terminated);
    let input_fn = parse_macro_input!(input as ItemFn);

    match generate_shsf_function(args, input_fn) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_shsf_function(
    args: Punctuated<Meta, Token![,]>,
    input_fn: ItemFn,
) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = ShsfFunctionAttrs::parse_meta_list(args)?;

    let function_id = attrs.id.ok_or_else(|| {
        syn::Error::new(
            proc_macro2::Span::call_site(),
            "missing required attribute: id",
        )
    })?;
    let version = attrs.version.unwrap_or_else(|| "v1".to_string());
    let description = attrs.description.unwrap_or_default();

    if input_fn.sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(
            &input_fn.sig,
            "shsf_function must not be async",
        ));
    }
    let inputs = &input_fn.sig.inputs;
    if inputs.len() != 1 || matches!(inputs.first(), Some(FnArg::Receiver(_))) {
        return Err(syn::Error::new_spanned(
            inputs,
            "shsf_function takes exactly one argument: the invocation argument",
        ));
    }

    let fn_name = &input_fn.sig.ident;
    let fn_vis = &input_fn.vis;
    let struct_name = format_ident!("{}Function", to_pascal_case(&fn_name.to_string()));
    let manifest_name = format_ident!("{}_MANIFEST", fn_name.to_string().to_uppercase());

    let expanded = quote! {
        /// Generated function manifest for compile-time metadata.
        #[allow(dead_code)]
        #fn_vis static #manifest_name: ::shsf::function::FunctionManifest =
            ::shsf::function::FunctionManifest {
                id: #function_id,
                version: #version,
                description: #description,
            };

        /// Generated SHSF function type.
        #[derive(Debug, Default, Clone, Copy)]
        #fn_vis struct #struct_name;

        impl #struct_name {
            /// Create a new instance of the function.
            pub fn new() -> Self {
                Self
            }

            /// Get the function manifest.
            pub fn manifest() -> &'static ::shsf::function::FunctionManifest {
                &#manifest_name
            }
        }

        impl ::shsf::function::ShsfFunction for #struct_name {
            fn invoke(
                &self,
                arg: &::shsf::invocation::InvocationArgument,
            ) -> ::std::result::Result<::shsf::envelope::Envelope, ::shsf::error::InternalFault> {
                #fn_name(arg)
            }

            fn name(&self) -> &str {
                #function_id
            }
        }

        #input_fn
    };

    Ok(expanded)
}

/// Convert a snake_case string to PascalCase.
fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}
