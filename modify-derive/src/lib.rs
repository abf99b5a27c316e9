// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `#[derive(Modify)]` generates a consuming `with_<field>` setter for
//! every named field of a struct:
//!
//! ```ignore
//! #[derive(Modify)]
//! struct FigureConfig { width: u32 }
//!
//! let cfg = FigureConfig { width: 10 }.with_width(20);
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields};

#[proc_macro_derive(Modify)]
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream2> {
    let DeriveInput {
        ident,
        data,
        generics,
        ..
    } = input;
    let fields = match data {
        Data::Struct(ds) => match ds.fields {
            Fields::Named(named) => named.named,
            other => {
                return Err(Error::new_spanned(
                    other,
                    "Modify only applies to structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &ident,
                "Modify expects a struct, but found an enum or union",
            ))
        }
    };

    let setters = fields.iter().filter_map(|f| {
        let fid = f.ident.as_ref()?;
        let ty = &f.ty;
        let setter = format_ident!("with_{}", fid);
        let doc = format!("Replace `{}`.", fid);
        Some(quote! {
            #[doc = #doc]
            pub fn #setter(mut self, new_value: #ty) -> Self {
                self.#fid = new_value;
                self
            }
        })
    });

    let (impl_generics, ty_generics, where_clause) =
        generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            #(#setters)*
        }
    })
}
