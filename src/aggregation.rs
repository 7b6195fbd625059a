//! Query aggregation results, shared by the v1 and v2 query responses.
//!
//! Aggregations arrive as JSON objects discriminated by their `type` field.
//! Types this crate does not model decode into [`QueryAggregation::Other`]
//! with the full payload preserved.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum QueryAggregation {
    Term(QueryTermAggregation),
    Histogram(QueryHistogramAggregation),
    Timeslice(QueryTimesliceAggregation),
    Nested(QueryNestedAggregation),
    Filter(QueryFilterAggregation),
    Min(QueryCalculationAggregation),
    Max(QueryCalculationAggregation),
    Sum(QueryCalculationAggregation),
    Average(QueryCalculationAggregation),
    UniqueCount(QueryCalculationAggregation),
    TopHits(QueryTopHitsAggregation),
    GroupBy(QueryGroupByAggregation),
    Other(Value),
}

impl QueryAggregation {
    /// The wire `type` discriminator.
    pub fn type_name(&self) -> &str {
        match self {
            QueryAggregation::Term(_) => "term",
            QueryAggregation::Histogram(_) => "histogram",
            QueryAggregation::Timeslice(_) => "timeslice",
            QueryAggregation::Nested(_) => "nested",
            QueryAggregation::Filter(_) => "filter",
            QueryAggregation::Min(_) => "min",
            QueryAggregation::Max(_) => "max",
            QueryAggregation::Sum(_) => "sum",
            QueryAggregation::Average(_) => "average",
            QueryAggregation::UniqueCount(_) => "unique_count",
            QueryAggregation::TopHits(_) => "top_hits",
            QueryAggregation::GroupBy(_) => "group_by",
            QueryAggregation::Other(v) => v.get("type").and_then(|t| t.as_str()).unwrap_or(""),
        }
    }
}

impl<'de> Deserialize<'de> for QueryAggregation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();

        if !value.is_object() {
            return Err(D::Error::custom("aggregation must be a JSON object"));
        }

        // A known type whose payload does not fit the typed model is kept raw.
        let typed = match kind.as_str() {
            "term" => serde_json::from_value(value.clone()).map(QueryAggregation::Term).ok(),
            "histogram" => serde_json::from_value(value.clone()).map(QueryAggregation::Histogram).ok(),
            "timeslice" => serde_json::from_value(value.clone()).map(QueryAggregation::Timeslice).ok(),
            "nested" => serde_json::from_value(value.clone()).map(QueryAggregation::Nested).ok(),
            "filter" => serde_json::from_value(value.clone()).map(QueryAggregation::Filter).ok(),
            "min" => serde_json::from_value(value.clone()).map(QueryAggregation::Min).ok(),
            "max" => serde_json::from_value(value.clone()).map(QueryAggregation::Max).ok(),
            "sum" => serde_json::from_value(value.clone()).map(QueryAggregation::Sum).ok(),
            "average" => serde_json::from_value(value.clone()).map(QueryAggregation::Average).ok(),
            "unique_count" => serde_json::from_value(value.clone()).map(QueryAggregation::UniqueCount).ok(),
            "top_hits" => serde_json::from_value(value.clone()).map(QueryAggregation::TopHits).ok(),
            "group_by" => serde_json::from_value(value.clone()).map(QueryAggregation::GroupBy).ok(),
            _ => None,
        };
        Ok(typed.unwrap_or(QueryAggregation::Other(value)))
    }
}

impl Serialize for QueryAggregation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::Error as _;

        let body = match self {
            QueryAggregation::Other(v) => return v.serialize(serializer),
            QueryAggregation::Term(a) => serde_json::to_value(a),
            QueryAggregation::Histogram(a) => serde_json::to_value(a),
            QueryAggregation::Timeslice(a) => serde_json::to_value(a),
            QueryAggregation::Nested(a) => serde_json::to_value(a),
            QueryAggregation::Filter(a) => serde_json::to_value(a),
            QueryAggregation::Min(a)
            | QueryAggregation::Max(a)
            | QueryAggregation::Sum(a)
            | QueryAggregation::Average(a)
            | QueryAggregation::UniqueCount(a) => serde_json::to_value(a),
            QueryAggregation::TopHits(a) => serde_json::to_value(a),
            QueryAggregation::GroupBy(a) => serde_json::to_value(a),
        }
        .map_err(S::Error::custom)?;

        let mut map = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        map.insert("type".to_string(), Value::String(self.type_name().to_string()));
        map.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryTermAggregation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryTermAggregationResult>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryTermAggregationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,
    /// Only present when relevancy scoring was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevancy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_matching_documents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_matching_results: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryHistogramAggregation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryHistogramAggregationResult>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryHistogramAggregationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryTimesliceAggregation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Calendar interval such as `1d` or `1M`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryTimesliceAggregationResult>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryTimesliceAggregationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_as_string: Option<String>,
    /// Milliseconds since the epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryNestedAggregation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryFilterAggregation {
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<QueryAggregation>>,
}

/// Single-valued `min`, `max`, `sum`, `average` and `unique_count` results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryCalculationAggregation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryTopHitsAggregation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<QueryTopHitsAggregationResult>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryTopHitsAggregationResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_results: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<Vec<Map<String, Value>>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryGroupByAggregation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<QueryTermAggregationResult>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_term_aggregations_decode() {
        let raw = json!([
            {
                "type": "term",
                "field": "enriched_text.entities.type",
                "count": 2,
                "results": [
                    {
                        "key": "Organization",
                        "matching_results": 14,
                        "aggregations": [
                            {"type": "max", "field": "price", "value": 42.5}
                        ]
                    }
                ]
            },
            {"type": "unique_count", "field": "author", "value": 7.0}
        ]);
        let aggs: Vec<QueryAggregation> = serde_json::from_value(raw).unwrap();
        let QueryAggregation::Term(term) = &aggs[0] else {
            panic!("expected term aggregation, got {:?}", aggs[0]);
        };
        let first = &term.results.as_ref().unwrap()[0];
        assert_eq!(first.key.as_deref(), Some("Organization"));
        assert!(matches!(
            first.aggregations.as_ref().unwrap()[0],
            QueryAggregation::Max(QueryCalculationAggregation { value: Some(v), .. }) if v == 42.5
        ));
        assert_eq!(aggs[1].type_name(), "unique_count");
    }

    #[test]
    fn unknown_type_is_preserved() {
        let raw = json!({"type": "trend", "facet": "x", "results": []});
        let agg: QueryAggregation = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(agg.type_name(), "trend");
        assert_eq!(serde_json::to_value(&agg).unwrap(), raw);
    }

    #[test]
    fn known_type_with_unexpected_shape_is_kept_raw() {
        // numeric term keys do not fit QueryTermAggregationResult::key
        let raw = json!({
            "type": "term",
            "field": "year",
            "results": [{"key": 2019, "matching_results": 4}]
        });
        let agg: QueryAggregation = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(agg, QueryAggregation::Other(_)));
        assert_eq!(agg.type_name(), "term");
        assert_eq!(serde_json::to_value(&agg).unwrap(), raw);

        let response: Vec<QueryAggregation> =
            serde_json::from_value(json!([raw, {"type": "max", "field": "price", "value": 1.5}]))
                .unwrap();
        assert!(matches!(response[1], QueryAggregation::Max(_)));
    }

    #[test]
    fn serialized_form_carries_type() {
        let agg = QueryAggregation::Filter(QueryFilterAggregation {
            match_: Some("enriched_text.sentiment.label:positive".into()),
            matching_results: Some(3),
            aggregations: None,
        });
        assert_eq!(
            serde_json::to_value(&agg).unwrap(),
            json!({"type": "filter", "match": "enriched_text.sentiment.label:positive", "matching_results": 3})
        );
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(serde_json::from_value::<QueryAggregation>(json!(12)).is_err());
    }
}
