//! Source catalog: which tileset backs each map layer.
//!
//! Sources state which data the map should display. A source alone does not
//! put anything on screen; layers refer to a source and give it a visual
//! representation, which makes it possible to style the same source in
//! different ways.

/// Kind of backing data for a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Raster,
    Vector,
    GeoJson,
}

/// One tiled source: a layer id, the named layer inside the tileset, and
/// the tileset it comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSource {
    pub id: &'static str,
    pub source_layer: &'static str,
    pub tileset_id: &'static str,
    pub kind: SourceKind,
}

/// The built-in Sierra Leone tileset catalog.
pub fn catalog() -> &'static [MapSource] {
    const CATALOG: &[MapSource] = &[
        MapSource {
            id: "sierra-leone-borders",
            source_layer: "Sierra_Leone_Country_Border-cch16f",
            tileset_id: "iandmuir.8whqk4of",
            kind: SourceKind::Vector,
        },
        MapSource {
            id: "sierra-leone-districts",
            source_layer: "Sierra_Leone_Districts-c34k65",
            tileset_id: "iandmuir.4f3biqz2",
            kind: SourceKind::Vector,
        },
        MapSource {
            id: "sierra-leone-transmission",
            source_layer: "Sierra_Leone_Transmission_Lin-dyrefu",
            tileset_id: "iandmuir.cv1a7jo6",
            kind: SourceKind::Vector,
        },
        MapSource {
            id: "sierra-leone-pharmacy",
            source_layer: "Sierra_Leone_Pharmacies-cz5yed",
            tileset_id: "iandmuir.5me2tui9",
            kind: SourceKind::Vector,
        },
        MapSource {
            id: "sierra-leone-schools",
            source_layer: "Sierra_Leone_Schools-0nmwd3",
            tileset_id: "iandmuir.az8kzkrs",
            kind: SourceKind::Vector,
        },
        MapSource {
            id: "sierra-leone-banks",
            source_layer: "Sierra_Leone_Banks-0q3a0o",
            tileset_id: "iandmuir.26ukns6c",
            kind: SourceKind::Vector,
        },
    ];
    CATALOG
}

/// Look up the source backing a layer id. Layers without a source still
/// render as placeholders, so a `None` here is not an error.
pub fn source_for(layer_id: &str) -> Option<&'static MapSource> {
    catalog().iter().find(|s| s.id == layer_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let sources = catalog();
        for (i, a) in sources.iter().enumerate() {
            for b in &sources[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_source_for_known_layer() {
        let source = source_for("sierra-leone-schools").unwrap();
        assert_eq!(source.tileset_id, "iandmuir.az8kzkrs");
        assert_eq!(source.kind, SourceKind::Vector);
    }

    #[test]
    fn test_source_for_unknown_layer_is_none() {
        assert!(source_for("atlantis-schools").is_none());
    }
}
