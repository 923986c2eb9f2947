//! `#[derive(Table)]` - route tables from unit enums.
//!
//! ```rust,ignore
//! #[derive(Table)]
//! #[table(module = "user")]
//! enum UserTable {
//!     Login,                      // "user/login"
//!     #[route("profile/detail")]
//!     Profile,                    // "user/profile/detail"
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use std::collections::HashSet;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Implementation of `#[derive(Table)]`.
pub fn derive_table_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "Table can only be derived for enums",
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            name,
            "Table requires at least one variant",
        ));
    }

    let module = table_module(&input.attrs)?;

    let mut seen = HashSet::new();
    let mut arms = Vec::with_capacity(data.variants.len());
    let mut urls = Vec::with_capacity(data.variants.len());

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                &variant.fields,
                "Table variants must be unit variants",
            ));
        }

        let route = match variant_route(&variant.attrs)? {
            Some(route) => route,
            None => snake_case(&variant.ident.to_string()),
        };
        let url = match &module {
            Some(module) => format!("{module}/{route}"),
            None => route,
        };
        if !seen.insert(url.clone()) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate route key `{url}`"),
            ));
        }

        let ident = &variant.ident;
        let lit = LitStr::new(&url, Span::call_site());
        arms.push(quote! { Self::#ident => #lit });
        urls.push(lit);
    }

    Ok(quote! {
        impl #impl_generics ::switchyard::Table for #name #ty_generics #where_clause {
            fn url(&self) -> ::core::option::Option<::switchyard::Key> {
                ::core::option::Option::Some(::switchyard::Key::from(match self {
                    #(#arms,)*
                }))
            }
        }

        impl #impl_generics #name #ty_generics #where_clause {
            /// Every route key in this table, in declaration order.
            pub const URLS: &'static [&'static str] = &[#(#urls),*];
        }
    })
}

/// Reads `#[table(module = "...")]`.
fn table_module(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut module = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("table")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("module") {
                let lit: LitStr = meta.value()?.parse()?;
                let value = lit.value();
                if value.is_empty() || value.ends_with('/') {
                    return Err(meta.error("module must be non-empty and not end with '/'"));
                }
                module = Some(value);
                Ok(())
            } else {
                Err(meta.error("unknown table attribute"))
            }
        })?;
    }
    Ok(module)
}

/// Reads `#[route("...")]`.
fn variant_route(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut route = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("route")) {
        let lit: LitStr = attr.parse_args()?;
        if lit.value().is_empty() {
            return Err(syn::Error::new_spanned(lit, "route must not be empty"));
        }
        route = Some(lit.value());
    }
    Ok(route)
}

/// `AvatarUrl` -> `avatar_url`, `HTTPStatus` -> `http_status`, `Step2Done` -> `step2_done`.
///
/// A word boundary sits before an uppercase letter that follows a lowercase
/// letter or digit, or that ends an acronym and starts a capitalized word.
fn snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let after_word = prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit());
            let ends_acronym =
                prev.is_some_and(char::is_uppercase) && next.is_some_and(char::is_lowercase);
            if after_word || ends_acronym {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::snake_case;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Login"), "login");
        assert_eq!(snake_case("UserProfile"), "user_profile");
        assert_eq!(snake_case("HTTPStatus"), "http_status");
        assert_eq!(snake_case("URL"), "url");
        assert_eq!(snake_case("AvatarUrl"), "avatar_url");
        assert_eq!(snake_case("ParseIOError"), "parse_io_error");
        assert_eq!(snake_case("Step2Done"), "step2_done");
    }
}
