// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, Fields};

use super::attrs::{parse_variant_attrs, ContainerAttrs, ContainerKind};

/// Bodies of `MarshalDefault`, `EnumConstant` and `Marshal` for a unit-only enum.
pub struct EnumImpl {
    pub marshal_default: TokenStream,
    pub constant_items: TokenStream,
    pub marshal_items: TokenStream,
}

pub fn gen_enum(data_enum: &DataEnum, attrs: &ContainerAttrs) -> syn::Result<EnumImpl> {
    if attrs.kind != ContainerKind::Record {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "enums cannot be associative or sequential",
        ));
    }
    if data_enum.variants.is_empty() {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "cannot derive Marshal for an enum without variants",
        ));
    }

    let mut idents = Vec::with_capacity(data_enum.variants.len());
    let mut names = Vec::with_capacity(data_enum.variants.len());
    let mut accepted = Vec::with_capacity(data_enum.variants.len());
    let mut default_variant = None;
    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Marshal enums may only have unit variants",
            ));
        }
        let variant_attrs = parse_variant_attrs(&variant.attrs)?;
        if variant_attrs.default {
            if default_variant.is_some() {
                return Err(syn::Error::new_spanned(
                    variant,
                    "multiple variants marked #[marshal(default)]",
                ));
            }
            default_variant = Some(&variant.ident);
        }
        let name = variant_attrs
            .rename
            .unwrap_or_else(|| variant.ident.to_string());
        let mut names_for_variant = vec![name.clone()];
        names_for_variant.extend(variant_attrs.aliases);
        idents.push(&variant.ident);
        names.push(name);
        accepted.push(names_for_variant);
    }
    let default_variant = default_variant.unwrap_or(idents[0]);

    let accepted_arms = idents.iter().zip(&accepted).map(|(ident, names)| {
        quote! { #(#names)|* => Some(Self::#ident), }
    });

    let marshal_default = quote! { Self::#default_variant };
    let constant_items = quote! {
        fn constant_name(&self) -> &'static str {
            match self {
                #(Self::#idents => #names,)*
            }
        }

        fn from_constant_name(name: &str) -> Option<Self> {
            match name {
                #(#accepted_arms)*
                _ => None,
            }
        }

        fn constant_names() -> &'static [&'static str] {
            &[#(#names),*]
        }
    };
    let marshal_items = quote! {
        fn shape() -> graph_marshal_core::Shape {
            graph_marshal_core::Shape::Enumeration
        }

        fn requires_entries() -> bool {
            true
        }

        fn marshall(
            &self,
            context: &mut graph_marshal_core::MarshalContext,
        ) -> Result<graph_marshal_core::Value, graph_marshal_core::Error> {
            graph_marshal_core::marshal::enum_::marshall_enum(self, context)
        }

        fn unmarshall_node(
            node: &graph_marshal_core::Node,
            context: &mut graph_marshal_core::UnmarshalContext,
        ) -> Result<Self, graph_marshal_core::Error> {
            graph_marshal_core::marshal::enum_::unmarshall_enum(node, context)
        }
    };
    Ok(EnumImpl {
        marshal_default,
        constant_items,
        marshal_items,
    })
}
