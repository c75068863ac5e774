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
use syn::{DataStruct, Fields};

use super::attrs::{ContainerAttrs, ContainerKind};
use crate::util::{self_construction, source_fields, SourceField};

pub fn gen_marshal_default(fields: &Fields, source_fields: &[SourceField<'_>]) -> TokenStream {
    self_construction(fields, source_fields, |sf| {
        if sf.attrs.skip {
            quote! { ::core::default::Default::default() }
        } else {
            let ty = &sf.field.ty;
            quote! { <#ty as graph_marshal_core::MarshalDefault>::marshal_default() }
        }
    })
}

fn gen_marshal_fields(source_fields: &[SourceField<'_>]) -> TokenStream {
    let calls = source_fields
        .iter()
        .filter(|sf| !sf.attrs.skip)
        .map(|sf| {
            let member = &sf.member;
            let name = &sf.entry_name;
            quote! {
                graph_marshal_core::marshal::struct_::marshall_field::<Self, _>(
                    node, #name, &self.#member, context,
                )?;
            }
        });
    quote! {
        #(#calls)*
        Ok(())
    }
}

fn gen_assign_field(source_fields: &[SourceField<'_>]) -> TokenStream {
    let arms = source_fields
        .iter()
        .filter(|sf| !sf.attrs.skip)
        .map(|sf| {
            let member = &sf.member;
            let names = sf.accepted_names();
            quote! {
                #(#names)|* => {
                    self.#member = context.unmarshall_value(value)?;
                    Ok(true)
                }
            }
        });
    quote! {
        match name {
            #(#arms)*
            _ => Ok(false),
        }
    }
}

fn gen_payload(kind: ContainerKind) -> TokenStream {
    let (marshal, fill) = match kind {
        ContainerKind::Record => return quote! {},
        ContainerKind::Associative => (
            quote! { graph_marshal_core::marshal::map::marshal_associative_payload },
            quote! { graph_marshal_core::marshal::map::fill_associative_payload },
        ),
        ContainerKind::Sequential => (
            quote! { graph_marshal_core::marshal::collection::marshal_sequential_payload },
            quote! { graph_marshal_core::marshal::collection::fill_sequential_payload },
        ),
    };
    quote! {
        fn marshal_payload(
            &self,
            node: &mut graph_marshal_core::Node,
            context: &mut graph_marshal_core::MarshalContext,
        ) -> Result<(), graph_marshal_core::Error> {
            #marshal(self, node, context)
        }

        fn fill_payload(
            &mut self,
            entry: &graph_marshal_core::Entry,
            context: &mut graph_marshal_core::UnmarshalContext,
        ) -> Result<(), graph_marshal_core::Error> {
            #fill(self, entry, context)
        }
    }
}

fn gen_after_unmarshal(attrs: &ContainerAttrs) -> TokenStream {
    match &attrs.post_unmarshal {
        Some(method) => quote! {
            fn after_unmarshal(&mut self) -> Result<(), graph_marshal_core::Error> {
                self.#method();
                Ok(())
            }
        },
        None => quote! {},
    }
}

fn gen_shape(kind: ContainerKind) -> TokenStream {
    match kind {
        ContainerKind::Record => quote! { graph_marshal_core::Shape::Record },
        ContainerKind::Associative => quote! { graph_marshal_core::Shape::Associative },
        ContainerKind::Sequential => quote! { graph_marshal_core::Shape::Sequential },
    }
}

/// Bodies of `MarshalDefault`, `Marshal` and `Record` for a struct.
pub struct RecordImpl {
    pub marshal_default: TokenStream,
    pub marshal_items: TokenStream,
    pub record_items: TokenStream,
}

pub fn gen_record(data_struct: &DataStruct, attrs: &ContainerAttrs) -> syn::Result<RecordImpl> {
    let source_fields = source_fields(&data_struct.fields)?;
    let marshal_default = gen_marshal_default(&data_struct.fields, &source_fields);
    let shape = gen_shape(attrs.kind);
    let requires_entries =
        attrs.kind != ContainerKind::Record || source_fields.iter().any(|sf| !sf.attrs.skip);
    let allocate = attrs.allocate.as_ref().map(|path| {
        quote! {
            fn allocate() -> Result<Self, graph_marshal_core::Error> {
                #path()
            }
        }
    });
    let marshal_items = quote! {
        fn shape() -> graph_marshal_core::Shape {
            #shape
        }

        fn requires_entries() -> bool {
            #requires_entries
        }

        fn marshall(
            &self,
            context: &mut graph_marshal_core::MarshalContext,
        ) -> Result<graph_marshal_core::Value, graph_marshal_core::Error> {
            graph_marshal_core::marshal::struct_::marshall_record(self, context)
        }

        fn unmarshall_node(
            node: &graph_marshal_core::Node,
            context: &mut graph_marshal_core::UnmarshalContext,
        ) -> Result<Self, graph_marshal_core::Error> {
            graph_marshal_core::marshal::struct_::unmarshall_record(node, context)
        }

        fn unmarshall_into(
            &mut self,
            node: &graph_marshal_core::Node,
            context: &mut graph_marshal_core::UnmarshalContext,
        ) -> Result<(), graph_marshal_core::Error> {
            graph_marshal_core::marshal::struct_::fill_record(self, node, context)
        }

        #allocate
    };
    let marshal_fields = gen_marshal_fields(&source_fields);
    let assign_field = gen_assign_field(&source_fields);
    let payload = gen_payload(attrs.kind);
    let after_unmarshal = gen_after_unmarshal(attrs);
    let record_items = quote! {
        #[allow(unused_variables)]
        fn marshal_fields(
            &self,
            node: &mut graph_marshal_core::Node,
            context: &mut graph_marshal_core::MarshalContext,
        ) -> Result<(), graph_marshal_core::Error> {
            #marshal_fields
        }

        #[allow(unused_variables)]
        fn assign_field(
            &mut self,
            name: &str,
            value: &graph_marshal_core::Value,
            context: &mut graph_marshal_core::UnmarshalContext,
        ) -> Result<bool, graph_marshal_core::Error> {
            #assign_field
        }

        #payload

        #after_unmarshal
    };
    Ok(RecordImpl {
        marshal_default,
        marshal_items,
        record_items,
    })
}
