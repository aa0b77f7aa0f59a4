use std::collections::HashMap;

use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::state::{ImageResult, TargetVector};

const FIELDS_WITH_DISTANCE: &str = "_additional { id distance } index base64_image dataset_name";
const FIELDS_WITHOUT_DISTANCE: &str = "_additional { id } index base64_image dataset_name";

/// Seed of a nearest-neighbour lookup.
#[derive(Debug, Clone, Copy)]
pub enum NearClause<'a> {
    Text(&'a str),
    Image(&'a str),
    Object(&'a str),
}

/// Quotes a value as a GraphQL string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn near_query(
    collection: &str,
    clause: NearClause<'_>,
    target: TargetVector,
    limit: usize,
) -> String {
    let targets = format!("targetVectors: [{}]", string_literal(target.vector_name()));
    let near = match clause {
        NearClause::Text(text) => {
            format!("nearText: {{concepts: [{}], {}}}", string_literal(text), targets)
        }
        NearClause::Image(image) => {
            format!("nearImage: {{image: {}, {}}}", string_literal(image), targets)
        }
        NearClause::Object(id) => {
            format!("nearObject: {{id: {}, {}}}", string_literal(id), targets)
        }
    };
    format!(
        "{{ Get {{ {}({}, limit: {}) {{ {} }} }} }}",
        collection, near, limit, FIELDS_WITH_DISTANCE
    )
}

/// Or-of-equalities on the numeric `index` property.
pub fn index_filter_query(collection: &str, indexes: &[i64]) -> String {
    let operands: Vec<String> = indexes
        .iter()
        .map(|i| {
            format!(
                "{{path: [\"index\"], operator: Equal, valueNumber: {}}}",
                i
            )
        })
        .collect();
    format!(
        "{{ Get {{ {}(where: {{operator: Or, operands: [{}]}}, limit: {}) {{ {} }} }} }}",
        collection,
        operands.join(", "),
        indexes.len(),
        FIELDS_WITHOUT_DISTANCE
    )
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<GetData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GetData {
    #[serde(rename = "Get")]
    get: Option<HashMap<String, Option<Vec<RawObject>>>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct RawObject {
    #[serde(rename = "_additional")]
    additional: Option<Additional>,
    index: Option<f64>,
    base64_image: Option<String>,
    dataset_name: Option<String>,
}

#[derive(Deserialize)]
struct Additional {
    id: Option<String>,
    distance: Option<f64>,
}

/// Extracts `data.Get.<collection>` from a response body. Objects without an
/// id get `<id_prefix>-<row>` so ids stay unique within a column.
pub fn parse_get_response(
    collection: &str,
    body: &str,
    id_prefix: &str,
) -> Result<Vec<ImageResult>> {
    let resp: GraphQlResponse = serde_json::from_str(body)
        .map_err(|e| anyhow!("failed to parse GraphQL response: {}", e))?;

    if !resp.errors.is_empty() {
        let messages: Vec<&str> = resp.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(anyhow!("GraphQL errors: {}", messages.join("; ")));
    }

    let rows = resp
        .data
        .and_then(|d| d.get)
        .and_then(|mut get| get.remove(collection))
        .flatten()
        .unwrap_or_default();

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            let (id, distance) = match raw.additional {
                Some(a) => (a.id, a.distance),
                None => (None, None),
            };
            ImageResult {
                id: id.unwrap_or_else(|| format!("{}-{}", id_prefix, row)),
                index: raw.index.map(|i| i as i64).unwrap_or(0),
                base64_image: raw.base64_image.unwrap_or_default(),
                dataset_name: raw.dataset_name.unwrap_or_default(),
                distance: distance.map(|d| d.max(0.0)),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_text_query_shape() {
        let q = near_query("ClipArena", NearClause::Text("red car"), TargetVector::SigLip2, 20);
        assert_eq!(
            q,
            "{ Get { ClipArena(nearText: {concepts: [\"red car\"], targetVectors: [\"siglip2\"]}, limit: 20) \
             { _additional { id distance } index base64_image dataset_name } } }"
        );
    }

    #[test]
    fn test_near_image_and_object_clauses() {
        let q = near_query("C", NearClause::Image("aGk="), TargetVector::MetaClip2, 10);
        assert!(q.contains("nearImage: {image: \"aGk=\", targetVectors: [\"metaclip2\"]}"));

        let q = near_query("C", NearClause::Object("obj-42"), TargetVector::ModernVbert, 10);
        assert!(q.contains("nearObject: {id: \"obj-42\", targetVectors: [\"modernvbert\"]}"));
    }

    #[test]
    fn test_text_is_escaped() {
        let q = near_query("C", NearClause::Text("say \"hi\"\n\\"), TargetVector::MetaClip2, 1);
        assert!(q.contains(r#"concepts: ["say \"hi\"\n\\"]"#), "{}", q);
        assert_eq!(string_literal("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_index_filter_query() {
        let q = index_filter_query("ClipArena", &[6331, 6036]);
        assert!(q.contains("where: {operator: Or, operands: [{path: [\"index\"], operator: Equal, valueNumber: 6331}, {path: [\"index\"], operator: Equal, valueNumber: 6036}]}"));
        assert!(q.contains("limit: 2"));
        assert!(!q.contains("distance"));
    }

    #[test]
    fn test_parse_fills_defaults() {
        let body = r#"{"data":{"Get":{"ClipArena":[
            {"_additional":{"id":"a","distance":0.25},"index":6331.0,"base64_image":"eA==","dataset_name":"coco"},
            {"_additional":{"distance":-0.0000001},"index":null},
            {}
        ]}}}"#;
        let rows = parse_get_response("ClipArena", body, "siglip2").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "a");
        assert_eq!(rows[0].index, 6331);
        assert_eq!(rows[0].distance, Some(0.25));
        assert_eq!(rows[1].id, "siglip2-1");
        assert_eq!(rows[1].index, 0);
        assert_eq!(rows[1].distance, Some(0.0));
        assert_eq!(rows[2].dataset_name, "");
        assert_eq!(rows[2].distance, None);
    }

    #[test]
    fn test_parse_graphql_errors() {
        let body = r#"{"data":{"Get":{"ClipArena":null}},"errors":[{"message":"no such vector"}]}"#;
        let err = parse_get_response("ClipArena", body, "x").unwrap_err();
        assert!(err.to_string().contains("no such vector"));
    }

    #[test]
    fn test_parse_missing_collection_is_empty() {
        let body = r#"{"data":{"Get":{"Other":[]}}}"#;
        assert!(parse_get_response("ClipArena", body, "x").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_get_response("ClipArena", "{nope", "x").unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
