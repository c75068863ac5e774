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

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Field, Fields, Generics, Index, Member};

use crate::object::attrs::{parse_field_attrs, FieldAttrs};

/// A declared field with its entry name and attributes resolved.
///
/// For tuple structs the entry name is the field's position (`"0"`, `"1"`, ...).
pub struct SourceField<'a> {
    pub field: &'a Field,
    pub member: Member,
    pub entry_name: String,
    pub attrs: FieldAttrs,
}

impl SourceField<'_> {
    /// Every name this field answers to when unmarshalling.
    pub fn accepted_names(&self) -> Vec<&str> {
        let mut names = vec![self.entry_name.as_str()];
        names.extend(self.attrs.aliases.iter().map(String::as_str));
        names
    }
}

/// Declared fields in declaration order.
pub fn source_fields(fields: &Fields) -> syn::Result<Vec<SourceField<'_>>> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let attrs = parse_field_attrs(&field.attrs)?;
            let (member, declared_name) = match &field.ident {
                Some(ident) => (Member::Named(ident.clone()), ident.to_string()),
                None => (
                    Member::Unnamed(Index {
                        index: index as u32,
                        span: Span::call_site(),
                    }),
                    index.to_string(),
                ),
            };
            let entry_name = attrs.rename.clone().unwrap_or(declared_name);
            Ok(SourceField {
                field,
                member,
                entry_name,
                attrs,
            })
        })
        .collect()
}

/// `Self { .. }`, `Self( .. )` or `Self` with each field initialized by `init`.
pub fn self_construction(
    fields: &Fields,
    source_fields: &[SourceField<'_>],
    init: impl Fn(&SourceField<'_>) -> TokenStream,
) -> TokenStream {
    let inits = source_fields.iter().map(|sf| {
        let value = init(sf);
        match &sf.member {
            Member::Named(ident) => quote! { #ident: #value },
            Member::Unnamed(_) => value,
        }
    });
    match fields {
        Fields::Named(_) => quote! { Self { #(#inits),* } },
        Fields::Unnamed(_) => quote! { Self( #(#inits),* ) },
        Fields::Unit => quote! { Self },
    }
}

/// Adds a `Marshal` bound to every type parameter.
pub fn add_marshal_bounds(mut generics: Generics) -> Generics {
    for param in generics.type_params_mut() {
        param
            .bounds
            .push(syn::parse_quote!(graph_marshal_core::Marshal));
    }
    generics
}
