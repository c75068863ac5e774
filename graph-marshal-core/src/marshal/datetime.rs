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

use crate::error::Error;
use crate::marshal::util::{scalar_mismatch, unmarshall_scalar_node};
use crate::marshal::{Marshal, MarshalDefault, Shape};
use crate::node::{Node, Scalar, Value};
use crate::resolver::context::{MarshalContext, UnmarshalContext};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::borrow::Cow;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn text<'s>(scalar: &'s Scalar, class_name: &str) -> Result<&'s str, Error> {
    match scalar {
        Scalar::Str(s) => Ok(s),
        other => Err(scalar_mismatch(class_name, other)),
    }
}

#[cold]
fn unparsable(value: &str, class_name: &str, err: chrono::ParseError) -> Error {
    Error::field_assignment(format!(
        "`{}` is not a valid `{}`: {}",
        value, class_name, err
    ))
}

impl Marshal for NaiveDate {
    fn class_name() -> Cow<'static, str> {
        Cow::Borrowed("NaiveDate")
    }

    fn shape() -> Shape {
        Shape::Scalar
    }

    fn marshall(&self, _: &mut MarshalContext) -> Result<Value, Error> {
        Ok(Value::Scalar(Scalar::Str(
            self.format(DATE_FORMAT).to_string(),
        )))
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        unmarshall_scalar_node(node, context)
    }

    fn unmarshall_scalar(scalar: &Scalar, _: &mut UnmarshalContext) -> Result<Self, Error> {
        let s = text(scalar, "NaiveDate")?;
        NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| unparsable(s, "NaiveDate", e))
    }
}

impl Marshal for NaiveDateTime {
    fn class_name() -> Cow<'static, str> {
        Cow::Borrowed("NaiveDateTime")
    }

    fn shape() -> Shape {
        Shape::Scalar
    }

    fn marshall(&self, _: &mut MarshalContext) -> Result<Value, Error> {
        Ok(Value::Scalar(Scalar::Str(
            self.format(DATE_TIME_FORMAT).to_string(),
        )))
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        unmarshall_scalar_node(node, context)
    }

    fn unmarshall_scalar(scalar: &Scalar, _: &mut UnmarshalContext) -> Result<Self, Error> {
        let s = text(scalar, "NaiveDateTime")?;
        NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
            .map_err(|e| unparsable(s, "NaiveDateTime", e))
    }
}

impl Marshal for DateTime<Utc> {
    fn class_name() -> Cow<'static, str> {
        Cow::Borrowed("DateTime")
    }

    fn shape() -> Shape {
        Shape::Scalar
    }

    fn marshall(&self, _: &mut MarshalContext) -> Result<Value, Error> {
        Ok(Value::Scalar(Scalar::Str(
            self.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        )))
    }

    fn unmarshall_node(node: &Node, context: &mut UnmarshalContext) -> Result<Self, Error> {
        unmarshall_scalar_node(node, context)
    }

    fn unmarshall_scalar(scalar: &Scalar, _: &mut UnmarshalContext) -> Result<Self, Error> {
        let s = text(scalar, "DateTime")?;
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| unparsable(s, "DateTime", e))
    }
}

impl MarshalDefault for NaiveDateTime {
    fn marshal_default() -> Self {
        NaiveDateTime::default()
    }
}

impl MarshalDefault for NaiveDate {
    fn marshal_default() -> Self {
        NaiveDate::default()
    }
}

impl MarshalDefault for DateTime<Utc> {
    fn marshal_default() -> Self {
        DateTime::<Utc>::default()
    }
}
