use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::inspector::error::InspectorError;
use crate::tree::builder::{ELEMENT_FIELD, ROOT_FIELD, build_tree};
use crate::tree::tree_model::UiTree;

/// Convert an XML hierarchy dump into the nested field structure consumed by
/// [`build_tree`].
///
/// Attribute values are kept exactly as written (entity-escaped). Elements
/// named anything other than `node`/`hierarchy` (Appium page sources name
/// elements after their class) are attached as `node` children and get their
/// element name as `class` when they carry none.
pub fn parse_xml(xml: &str) -> Result<Value, InspectorError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<(String, Map<String, Value>)> = Vec::new();
    let mut root: Option<Map<String, Value>> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|source| InspectorError::DumpParse { source })?;

        match event {
            Event::Start(e) => {
                let name = element_name(&e);
                let fields = element_fields(&e, &name)?;
                stack.push((name, fields));
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                let fields = element_fields(&e, &name)?;
                attach(&mut stack, &mut root, &name, fields)?;
            }
            Event::End(_) => {
                let (name, fields) = stack.pop().ok_or_else(|| {
                    InspectorError::DumpStructure("unexpected closing tag".into())
                })?;
                attach(&mut stack, &mut root, &name, fields)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((name, _)) = stack.last() {
        return Err(InspectorError::DumpStructure(format!(
            "element '{}' is never closed",
            name
        )));
    }

    root.map(Value::Object)
        .ok_or_else(|| InspectorError::DumpStructure("dump has no root element".into()))
}

impl UiTree {
    /// Parse an XML hierarchy dump and build its tree.
    pub fn from_xml(xml: &str) -> Result<UiTree, InspectorError> {
        Ok(build_tree(&parse_xml(xml)?))
    }

    /// Parse a JSON hierarchy dump (already in nested field form).
    pub fn from_json(json: &str) -> Result<UiTree, InspectorError> {
        let value: Value = serde_json::from_str(json).map_err(|source| {
            InspectorError::JsonParse {
                context: "hierarchy dump".into(),
                source,
            }
        })?;
        Ok(build_tree(&value))
    }
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn element_fields(e: &BytesStart<'_>, name: &str) -> Result<Map<String, Value>, InspectorError> {
    let mut fields = Map::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| {
            InspectorError::DumpStructure(format!("bad attribute on '{}': {}", name, err))
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if key == ELEMENT_FIELD || key == ROOT_FIELD {
            continue;
        }
        let value = String::from_utf8_lossy(&attr.value).into_owned();
        fields.insert(key, Value::String(value));
    }

    if name != ELEMENT_FIELD && name != ROOT_FIELD && !fields.contains_key("class") {
        fields.insert("class".into(), Value::String(name.to_string()));
    }

    Ok(fields)
}

fn attach(
    stack: &mut [(String, Map<String, Value>)],
    root: &mut Option<Map<String, Value>>,
    name: &str,
    fields: Map<String, Value>,
) -> Result<(), InspectorError> {
    match stack.last_mut() {
        Some((_, parent)) => {
            let slot = parent
                .entry(ELEMENT_FIELD)
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(children) = slot {
                children.push(Value::Object(fields));
            }
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(fields);
            Ok(())
        }
        None => Err(InspectorError::DumpStructure(format!(
            "second top-level element '{}'",
            name
        ))),
    }
}
