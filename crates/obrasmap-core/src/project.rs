//! Project records and the collection they are loaded into.
//!
//! A [`Project`] is one public-works feature of the source GeoJSON document,
//! with its properties already extracted into typed, optional fields. The
//! extraction is lenient: a property that is missing, `null`, or of an
//! unexpected shape becomes `None` and every consumer substitutes its own
//! default.

use geojson::Feature;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Names of the GeoJSON properties read from each feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyKeys {
    /// Project name.
    pub name: String,
    /// Locality (town or district).
    pub locality: String,
    /// Agency responsible for the work.
    pub agency: String,
    /// Type of work.
    pub kind: String,
    /// Free-text status.
    pub status: String,
    /// Contracted amount in ARS.
    pub amount: String,
    /// Progress percentage.
    pub progress: String,
}

impl Default for PropertyKeys {
    fn default() -> Self {
        Self {
            name: "Nombre".to_string(),
            locality: "Localidad".to_string(),
            agency: "Organismo".to_string(),
            kind: "Tipo".to_string(),
            status: "Estado".to_string(),
            amount: "Monto".to_string(),
            progress: "Avance".to_string(),
        }
    }
}

/// A geographic point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Longitude.
    pub lon: f64,
    /// Latitude.
    pub lat: f64,
}

/// One public-works project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Project {
    /// Project name.
    pub name: Option<String>,
    /// Locality.
    pub locality: Option<String>,
    /// Responsible agency.
    pub agency: Option<String>,
    /// Type of work.
    pub kind: Option<String>,
    /// Free-text status, e.g. "En ejecución".
    pub status: Option<String>,
    /// Contracted amount, when it parses as a number.
    pub amount: Option<f64>,
    /// Raw progress percentage. Negative values mean "unset".
    pub progress: Option<f64>,
    /// Point geometry; `None` for missing or non-point geometries.
    pub location: Option<Location>,
}

impl Project {
    /// Extract a project from a GeoJSON feature.
    #[must_use]
    pub fn from_feature(feature: &Feature, keys: &PropertyKeys) -> Self {
        Self {
            name: text_value(feature.property(&keys.name)),
            locality: text_value(feature.property(&keys.locality)),
            agency: text_value(feature.property(&keys.agency)),
            kind: text_value(feature.property(&keys.kind)),
            status: text_value(feature.property(&keys.status)),
            amount: number_value(feature.property(&keys.amount)),
            progress: number_value(feature.property(&keys.progress)),
            location: point_location(feature),
        }
    }

    /// The amount, with a missing or unparsable value counted as zero.
    #[must_use]
    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Project name, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Locality, if present.
    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        self.locality.as_deref()
    }

    /// Agency, if present.
    #[must_use]
    pub fn agency(&self) -> Option<&str> {
        self.agency.as_deref()
    }

    /// Type of work, if present.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Status text, if present.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

/// Read a property as text.
///
/// Strings are kept verbatim, numbers and booleans are rendered. `null`,
/// arrays, objects and whitespace-only strings are treated as missing.
#[must_use]
pub fn text_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Read a property as a finite number.
///
/// Accepts JSON numbers and strings holding a plain decimal number.
#[must_use]
pub fn number_value(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn point_location(feature: &Feature) -> Option<Location> {
    let geometry = feature.geometry.as_ref()?;
    match &geometry.value {
        geojson::Value::Point(position) if position.len() >= 2 => Some(Location {
            lon: position[0],
            lat: position[1],
        }),
        _ => None,
    }
}

/// An ordered, immutable sequence of projects.
///
/// Order is the load order of the source document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProjectCollection {
    projects: Vec<Project>,
}

impl ProjectCollection {
    /// Create a collection from projects in the given order.
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Extract every feature of a GeoJSON feature collection.
    #[must_use]
    pub fn from_features(features: &[Feature], keys: &PropertyKeys) -> Self {
        features
            .iter()
            .map(|f| Project::from_feature(f, keys))
            .collect()
    }

    /// Number of projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the collection holds no projects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Iterate over the projects in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    /// Borrow the projects as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }
}

impl FromIterator<Project> for ProjectCollection {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        Self {
            projects: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ProjectCollection {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

impl IntoIterator for ProjectCollection {
    type Item = Project;
    type IntoIter = std::vec::IntoIter<Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(value: serde_json::Value) -> Feature {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_from_feature_reads_all_properties() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-57.55, -38.0] },
            "properties": {
                "Nombre": "Puente Nuevo",
                "Localidad": "Mar del Plata",
                "Organismo": "Vialidad",
                "Tipo": "Puentes",
                "Estado": "En ejecución",
                "Monto": 1500000,
                "Avance": "42.5"
            }
        }));
        let project = Project::from_feature(&f, &PropertyKeys::default());

        assert_eq!(project.name(), Some("Puente Nuevo"));
        assert_eq!(project.locality(), Some("Mar del Plata"));
        assert_eq!(project.agency(), Some("Vialidad"));
        assert_eq!(project.kind(), Some("Puentes"));
        assert_eq!(project.status(), Some("En ejecución"));
        assert_eq!(project.amount, Some(1_500_000.0));
        assert_eq!(project.progress, Some(42.5));
        assert_eq!(
            project.location,
            Some(Location {
                lon: -57.55,
                lat: -38.0,
            })
        );
    }

    #[test]
    fn test_from_feature_missing_properties() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": null,
            "properties": { "Nombre": null, "Monto": "sin dato" }
        }));
        let project = Project::from_feature(&f, &PropertyKeys::default());

        assert_eq!(project, Project::default());
        assert!((project.amount_or_zero() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_point_geometry_has_no_location() {
        let f = feature(json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] },
            "properties": { "Nombre": "Ruta" }
        }));
        let project = Project::from_feature(&f, &PropertyKeys::default());

        assert!(project.location.is_none());
        assert_eq!(project.name(), Some("Ruta"));
    }

    #[test]
    fn test_custom_property_keys() {
        let keys = PropertyKeys {
            name: "name".to_string(),
            ..PropertyKeys::default()
        };
        let f = feature(json!({
            "type": "Feature",
            "geometry": null,
            "properties": { "name": "Plaza", "Nombre": "ignored" }
        }));

        assert_eq!(Project::from_feature(&f, &keys).name(), Some("Plaza"));
    }

    #[test]
    fn test_text_value_shapes() {
        assert_eq!(text_value(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(text_value(Some(&json!(12))), Some("12".to_string()));
        assert_eq!(text_value(Some(&json!(true))), Some("true".to_string()));
        assert_eq!(text_value(Some(&json!("   "))), None);
        assert_eq!(text_value(Some(&json!(null))), None);
        assert_eq!(text_value(Some(&json!(["a"]))), None);
        assert_eq!(text_value(None), None);
    }

    #[test]
    fn test_number_value_shapes() {
        assert_eq!(number_value(Some(&json!(10))), Some(10.0));
        assert_eq!(number_value(Some(&json!(" 2.5 "))), Some(2.5));
        assert_eq!(number_value(Some(&json!("-3"))), Some(-3.0));
        assert_eq!(number_value(Some(&json!("NaN"))), None);
        assert_eq!(number_value(Some(&json!("inf"))), None);
        assert_eq!(number_value(Some(&json!("12 mil"))), None);
        assert_eq!(number_value(Some(&json!(null))), None);
        assert_eq!(number_value(None), None);
    }

    #[test]
    fn test_collection_preserves_order() {
        let collection: ProjectCollection = ["a", "b", "c"]
            .iter()
            .map(|n| Project {
                name: Some((*n).to_string()),
                ..Project::default()
            })
            .collect();

        let names: Vec<_> = collection.iter().filter_map(Project::name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(collection.len(), 3);
        assert!(!collection.is_empty());
    }
}
