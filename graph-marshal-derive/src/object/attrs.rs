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

//! Parsing of `#[marshal(...)]` attributes.
//!
//! - container: `name = ".."`, `associative`, `sequential`, `post_unmarshal = "method"`,
//!   `allocate = "path"`
//! - field: `skip`, `rename = ".."`, `alias = ".."`
//! - variant: `default`, `rename = ".."`, `alias = ".."`

use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Record,
    Associative,
    Sequential,
}

#[derive(Debug, Clone)]
pub struct ContainerAttrs {
    pub name: Option<LitStr>,
    pub kind: ContainerKind,
    pub post_unmarshal: Option<syn::Ident>,
    pub allocate: Option<syn::Path>,
}

#[derive(Debug, Clone, Default)]
pub struct FieldAttrs {
    pub skip: bool,
    pub rename: Option<String>,
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VariantAttrs {
    pub default: bool,
    pub rename: Option<String>,
    pub aliases: Vec<String>,
}

fn marshal_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("marshal"))
}

fn string_value(meta: &ParseNestedMeta) -> syn::Result<LitStr> {
    meta.value()?.parse()
}

pub fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut parsed = ContainerAttrs {
        name: None,
        kind: ContainerKind::Record,
        post_unmarshal: None,
        allocate: None,
    };
    for attr in marshal_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                parsed.name = Some(string_value(&meta)?);
            } else if meta.path.is_ident("associative") || meta.path.is_ident("sequential") {
                if parsed.kind != ContainerKind::Record {
                    return Err(meta.error("a type is either associative or sequential"));
                }
                parsed.kind = if meta.path.is_ident("associative") {
                    ContainerKind::Associative
                } else {
                    ContainerKind::Sequential
                };
            } else if meta.path.is_ident("post_unmarshal") {
                parsed.post_unmarshal = Some(string_value(&meta)?.parse()?);
            } else if meta.path.is_ident("allocate") {
                parsed.allocate = Some(string_value(&meta)?.parse()?);
            } else {
                return Err(meta.error("unsupported marshal container attribute"));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}

pub fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut parsed = FieldAttrs::default();
    for attr in marshal_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.skip = true;
            } else if meta.path.is_ident("rename") {
                parsed.rename = Some(string_value(&meta)?.value());
            } else if meta.path.is_ident("alias") {
                parsed.aliases.push(string_value(&meta)?.value());
            } else {
                return Err(meta.error("unsupported marshal field attribute"));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}

pub fn parse_variant_attrs(attrs: &[Attribute]) -> syn::Result<VariantAttrs> {
    let mut parsed = VariantAttrs::default();
    for attr in marshal_attrs(attrs) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                parsed.default = true;
            } else if meta.path.is_ident("rename") {
                parsed.rename = Some(string_value(&meta)?.value());
            } else if meta.path.is_ident("alias") {
                parsed.aliases.push(string_value(&meta)?.value());
            } else {
                return Err(meta.error("unsupported marshal variant attribute"));
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}
