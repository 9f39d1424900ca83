//! Unit tests for dl-restaurants.

#[cfg(test)]
mod helpers {
    /// Two routes, five restaurants, one empty row inside a route block.
    pub const TEMPLATE_V300: &str = "\
Version,3-0-0,,,
Route,Name,Start Time,Emoji,No Pics
TRUE,Solano Route,,,
FALSE,Cafe Raj,5:00 PM,:curry:,FALSE
FALSE,Kim's Cafe,5:00 PM,:bento:,TRUE
,,,,
FALSE,V&A Cafe,4:50 PM,:coffee:,FALSE
TRUE,Shattuck Route,,,
FALSE,Jot Mahal,5:00 PM,:naan:,FALSE
FALSE,Bopshop,5:10 PM,:taco:,FALSE
";

    pub const TEMPLATE_V1: &str = "\
Version,1
Name,Route,Start Time
Solano Route,TRUE,
Cafe Raj,FALSE,5:00 PM
";
}

#[cfg(test)]
mod parse {
    use dl_core::ClockTime;

    use super::helpers::*;
    use crate::{TemplateVersion, parse_catalog};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn v300_template() {
        let catalog = parse_catalog(TEMPLATE_V300).unwrap();
        assert_eq!(catalog.version, TemplateVersion::V300);
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.routes(), ["Solano Route", "Shattuck Route"]);

        let va = catalog.get("V&A Cafe").unwrap();
        assert_eq!(va.route, "Solano Route");
        assert_eq!(va.start_time, t("4:50 PM"));
        assert_eq!(va.emoji, ":coffee:");
        assert!(!va.no_pics);

        assert!(catalog.get("Kim's Cafe").unwrap().no_pics);
        assert_eq!(catalog.get("Bopshop").unwrap().route, "Shattuck Route");
        assert_eq!(catalog.on_route("Shattuck Route").count(), 2);
    }

    #[test]
    fn document_order_is_kept() {
        let catalog = parse_catalog(TEMPLATE_V300).unwrap();
        let names: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Cafe Raj", "Kim's Cafe", "V&A Cafe", "Jot Mahal", "Bopshop"]);
    }

    #[test]
    fn v1_template_has_no_optional_columns() {
        let catalog = parse_catalog(TEMPLATE_V1).unwrap();
        assert_eq!(catalog.version, TemplateVersion::V1);
        let raj = catalog.get("Cafe Raj").unwrap();
        assert_eq!(raj.emoji, "");
        assert!(!raj.no_pics);
        assert_eq!(raj.line, 4);
    }

    #[test]
    fn v200_ignores_no_pics_column() {
        let text = "\
Version,2-0-0
Route,Name,Start Time,Emoji,No Pics
TRUE,Solano Route,,,
FALSE,Cafe Raj,5:00 PM,:curry:,TRUE
";
        let catalog = parse_catalog(text).unwrap();
        assert!(!catalog.get("Cafe Raj").unwrap().no_pics);
    }
}

#[cfg(test)]
mod errors {
    use crate::{CatalogError, parse_catalog};

    fn err(text: &str) -> CatalogError {
        parse_catalog(text).unwrap_err()
    }

    #[test]
    fn duplicate_name_across_routes() {
        let e = err("\
Version,2-0-0
Route,Name,Start Time,Emoji
TRUE,Solano Route,,
FALSE,Cafe Raj,5:00 PM,:curry:
TRUE,Shattuck Route,,
FALSE,Cafe Raj,5:00 PM,:curry:
");
        assert!(matches!(e, CatalogError::Duplicate { line: 6, first_line: 4, .. }));
        assert!(e.to_string().contains("duplicate route entry for restaurant \"Cafe Raj\""));
    }

    #[test]
    fn missing_route_name() {
        let e = err("Version,1\nRoute,Name,Start Time\nTRUE,,\n");
        assert!(matches!(e, CatalogError::MissingRouteName { line: 3 }));
    }

    #[test]
    fn restaurant_before_route() {
        let e = err("Version,1\nRoute,Name,Start Time\nFALSE,Cafe Raj,5:00 PM\n");
        assert!(matches!(e, CatalogError::OutsideRoute { line: 3, .. }));
    }

    #[test]
    fn empty_restaurant_name() {
        let e = err("Version,1\nRoute,Name,Start Time\nTRUE,Solano,\nFALSE,,5:00 PM\n");
        assert!(matches!(e, CatalogError::EmptyName { line: 4 }));
    }

    #[test]
    fn unsupported_and_missing_versions() {
        let e = err("Version,4-0-0\nRoute,Name,Start Time\n");
        assert!(e.to_string().contains("version \"4-0-0\" at line 1 is not supported"));

        let e = err("Version,\nRoute,Name,Start Time\n");
        assert!(matches!(e, CatalogError::UnsupportedVersion { .. }));

        let e = err("Route,Name,Start Time\n");
        assert!(matches!(e, CatalogError::MissingVersion { line: 1, .. }));

        assert!(matches!(err(""), CatalogError::MissingVersion { .. }));
    }

    #[test]
    fn version_gates_required_columns() {
        let e = err("Version,3-0-0\nRoute,Name,Start Time,Emoji\n");
        assert!(e.to_string().contains("missing columns: No Pics"));
    }

    #[test]
    fn bad_start_times() {
        let base = "Version,1\nRoute,Name,Start Time\nTRUE,Solano,\n";
        let e = err(&format!("{base}FALSE,Cafe Raj,soon\n"));
        assert!(matches!(e, CatalogError::InvalidStartTime { line: 4, .. }));

        let e = err(&format!("{base}FALSE,Cafe Raj,4:52 PM\n"));
        assert!(e.to_string().contains("is not on the 5-minute grid"));
    }
}

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use super::helpers::TEMPLATE_V300;
    use crate::{load_catalog_csv, load_catalog_reader};

    #[test]
    fn reader_and_file_agree() {
        let from_reader = load_catalog_reader(Cursor::new(TEMPLATE_V300)).unwrap();

        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(TEMPLATE_V300.as_bytes()).unwrap();
        let from_file = load_catalog_csv(file.path()).unwrap();

        assert_eq!(from_reader.len(), from_file.len());
        assert_eq!(from_reader.get("Bopshop"), from_file.get("Bopshop"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_catalog_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, crate::CatalogError::Io(_)));
    }
}
