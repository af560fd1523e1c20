// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Typed request and response payloads for the management API.
//!
//! Each operation gets its own constructor taking only the fields it needs.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::types::Codename;

/// Reference to an uploaded binary file, returned by the upload call and
/// consumed by asset creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Project and environment names, used for the start-of-run banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub environment: String,
}

/// Raw binary upload. Cloning shares the payload buffer.
#[derive(Debug, Clone)]
pub struct BinaryUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl BinaryUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Value of the `Content-Length` header.
    pub fn content_length(&self) -> usize {
        self.data.len()
    }
}

/// Body of the create-asset call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRequest {
    pub file_reference: FileReference,
    pub title: String,
}

impl AssetRequest {
    pub fn new(file_reference: FileReference, title: impl Into<String>) -> Self {
        Self {
            file_reference,
            title: title.into(),
        }
    }
}

/// `{ "codename": ... }` wrapper used for content type and element references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodenameReference {
    pub codename: Codename,
}

/// Body of the create-content-item call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItemRequest {
    pub name: String,
    pub codename: Codename,
    #[serde(rename = "type")]
    pub content_type: CodenameReference,
}

impl ContentItemRequest {
    pub fn new(name: impl Into<String>, codename: Codename, content_type: Codename) -> Self {
        Self {
            name: name.into(),
            codename,
            content_type: CodenameReference {
                codename: content_type,
            },
        }
    }
}

/// Value of a single language-variant element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementValue {
    Number(f64),
    Text(String),
}

/// One element of a language variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantElement {
    pub element: CodenameReference,
    pub value: ElementValue,
}

/// Upsert of a language variant, addressed by item and language codename.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageVariantRequest {
    pub item: Codename,
    pub language: Codename,
    pub elements: Vec<VariantElement>,
}

/// Wire body of [`LanguageVariantRequest`]; the codenames travel in the path.
#[derive(Debug, Serialize)]
pub(crate) struct LanguageVariantBody<'a> {
    pub elements: &'a [VariantElement],
}

impl LanguageVariantRequest {
    pub fn new(item: Codename, language: Codename) -> Self {
        Self {
            item,
            language,
            elements: Vec::new(),
        }
    }

    /// Add an element.
    pub fn element(mut self, element: Codename, value: ElementValue) -> Self {
        self.elements.push(VariantElement {
            element: CodenameReference { codename: element },
            value,
        });
        self
    }

    /// Add a text element.
    pub fn text_element(self, element: Codename, value: impl Into<String>) -> Self {
        self.element(element, ElementValue::Text(value.into()))
    }

    /// Add a number element.
    pub fn number_element(self, element: Codename, value: f64) -> Self {
        self.element(element, ElementValue::Number(value))
    }

    pub(crate) fn body(&self) -> LanguageVariantBody<'_> {
        LanguageVariantBody {
            elements: &self.elements,
        }
    }
}
