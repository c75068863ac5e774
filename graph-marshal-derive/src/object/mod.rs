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

pub mod attrs;
mod derive_enum;
mod record;

use proc_macro2::TokenStream;
use quote::quote;

use crate::util::add_marshal_bounds;
use attrs::parse_container_attrs;

pub fn derive_marshal(ast: &syn::DeriveInput) -> syn::Result<TokenStream> {
    let name = &ast.ident;
    let attrs = parse_container_attrs(&ast.attrs)?;
    let generics = add_marshal_bounds(ast.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let class_name = match &attrs.name {
        Some(lit) => quote! { #lit },
        None => quote! { concat!(module_path!(), "::", stringify!(#name)) },
    };
    let class_name_fn = quote! {
        fn class_name() -> ::std::borrow::Cow<'static, str> {
            ::std::borrow::Cow::Borrowed(#class_name)
        }
    };

    let gen = match &ast.data {
        syn::Data::Struct(data_struct) => {
            let record = record::gen_record(data_struct, &attrs)?;
            let marshal_default = record.marshal_default;
            let marshal_items = record.marshal_items;
            let record_items = record.record_items;
            quote! {
                impl #impl_generics graph_marshal_core::MarshalDefault for #name #ty_generics #where_clause {
                    fn marshal_default() -> Self {
                        #marshal_default
                    }
                }

                impl #impl_generics graph_marshal_core::Marshal for #name #ty_generics #where_clause {
                    #class_name_fn
                    #marshal_items
                }

                impl #impl_generics graph_marshal_core::Record for #name #ty_generics #where_clause {
                    #record_items
                }
            }
        }
        syn::Data::Enum(data_enum) => {
            let enum_impl = derive_enum::gen_enum(data_enum, &attrs)?;
            let marshal_default = enum_impl.marshal_default;
            let constant_items = enum_impl.constant_items;
            let marshal_items = enum_impl.marshal_items;
            quote! {
                impl #impl_generics graph_marshal_core::MarshalDefault for #name #ty_generics #where_clause {
                    fn marshal_default() -> Self {
                        #marshal_default
                    }
                }

                impl #impl_generics graph_marshal_core::EnumConstant for #name #ty_generics #where_clause {
                    #constant_items
                }

                impl #impl_generics graph_marshal_core::Marshal for #name #ty_generics #where_clause {
                    #class_name_fn
                    #marshal_items
                }
            }
        }
        syn::Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "Marshal cannot be derived for unions",
            ))
        }
    };
    Ok(gen)
}
