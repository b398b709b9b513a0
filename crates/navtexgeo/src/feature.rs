//! GeoJSON-shaped output records

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Serialize;

use crate::geometry::Geometry;
use crate::message::MessageHeader;
use crate::navcodes::SubjectIndicator;

/// One bulletin rendered as a geographic feature
///
/// Produced by the [`parser`](crate::parser) for every block that
/// yielded at least one position. Blocks without positions produce
/// no `Feature` at all.
///
/// The serialized form follows the GeoJSON feature shape:
///
/// ```json
/// { "type": "Feature",
///   "id": "FA01",
///   "properties": { "call-sign": "FA01", "station": "F",
///                   "msg-type": "A", "msg-no": "01",
///                   "msg-date": "2023-04-29T14:05:00+02:00",
///                   "message": "ZCZC FA01\n…\nNNNN\n" },
///   "geometry": { "type": "Point", "coordinates": [8.25, 48.5] } }
/// ```
///
/// A bulletin whose header line never matched still becomes a
/// `Feature` when it has positions; its id and header properties
/// serialize as `null`.
#[derive(Clone, Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    pub id: Option<String>,
    pub properties: Properties,
    pub geometry: Geometry,
}

/// Metadata of one [`Feature`]
#[derive(Clone, Debug, Serialize)]
pub struct Properties {
    #[serde(rename = "call-sign")]
    pub call_sign: Option<String>,
    pub station: Option<String>,
    #[serde(rename = "msg-type")]
    pub msg_type: Option<String>,
    #[serde(rename = "msg-no")]
    pub msg_no: Option<String>,
    /// Issue time, ISO-8601 with the local offset
    #[serde(rename = "msg-date")]
    pub msg_date: String,
    /// Raw bulletin text, marker lines included
    pub message: String,
}

impl Feature {
    /// Assemble a feature from the extracted block fields
    pub fn new(
        header: Option<&MessageHeader>,
        issued: DateTime<Utc>,
        message: String,
        geometry: Geometry,
    ) -> Self {
        let call_sign = header.map(MessageHeader::call_sign);
        Feature {
            feature_type: "Feature",
            id: call_sign.clone(),
            properties: Properties {
                call_sign,
                station: header.map(|h| h.station().to_string()),
                msg_type: header.map(|h| h.subject_char().to_string()),
                msg_no: header.map(|h| h.serial().to_owned()),
                msg_date: issued
                    .with_timezone(&Local)
                    .to_rfc3339_opts(SecondsFormat::Secs, false),
                message,
            },
            geometry,
        }
    }

    /// Subject indicator decoded from the `msg-type` property
    pub fn subject(&self) -> Option<SubjectIndicator> {
        let c = self.properties.msg_type.as_ref()?.chars().next()?;
        Some(SubjectIndicator::from(c))
    }
}

/// The output of one parsing pass over one source
///
/// Serializes as `{"type": "FeatureCollection", "features": […]}`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    collection_type: CollectionTag,
    pub features: Vec<Feature>,
}

#[derive(Clone, Copy, Debug)]
struct CollectionTag;

impl Default for CollectionTag {
    fn default() -> Self {
        CollectionTag
    }
}

impl Serialize for CollectionTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str("FeatureCollection")
    }
}

impl FeatureCollection {
    /// New, empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one feature
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Append every feature of `other`
    pub fn append(&mut self, mut other: FeatureCollection) {
        self.features.append(&mut other.features);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
