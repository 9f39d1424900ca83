//! Unit tests for dl-core primitives.

#[cfg(test)]
mod time {
    use crate::{ClockTime, CoreError, GRID_MINUTES};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn parses_meridiem_forms() {
        assert_eq!(t("5:00 PM"), ClockTime::from_hm(17, 0).unwrap());
        assert_eq!(t("4:50 pm"), ClockTime::from_hm(16, 50).unwrap());
        assert_eq!(t("11:05AM"), ClockTime::from_hm(11, 5).unwrap());
        assert_eq!(t("12:00 AM"), ClockTime::MIDNIGHT);
        assert_eq!(t("12:30 PM"), ClockTime::from_hm(12, 30).unwrap());
    }

    #[test]
    fn parses_24_hour_form() {
        assert_eq!(t("17:45"), ClockTime::from_hm(17, 45).unwrap());
        assert_eq!(t(" 09:00 "), ClockTime::from_hm(9, 0).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "5 PM", "5:0 PM", "13:00 PM", "0:30 AM", "24:00", "5:60", "noon"] {
            let err = bad.parse::<ClockTime>().unwrap_err();
            assert!(matches!(err, CoreError::InvalidTime { .. }), "{bad:?} should fail");
        }
    }

    #[test]
    fn display_round_trips() {
        for s in ["5:00 PM", "4:50 PM", "12:00 AM", "12:05 PM", "9:15 AM"] {
            assert_eq!(t(s).to_string(), s);
        }
    }

    #[test]
    fn arithmetic_and_grid() {
        let five = t("5:00 PM");
        assert_eq!(five.minus(10), t("4:50 PM"));
        assert_eq!(five.plus(15), t("5:15 PM"));
        assert_eq!(ClockTime::MIDNIGHT.minus(5), ClockTime::MIDNIGHT);

        assert_eq!(t("4:58 PM").floor_to_grid(GRID_MINUTES), t("4:55 PM"));
        assert!(five.is_on_grid(GRID_MINUTES));
        assert!(!t("4:52 PM").is_on_grid(GRID_MINUTES));
    }

    #[test]
    fn ordering() {
        assert!(t("4:50 PM") < t("5:00 PM"));
        assert!(t("11:59 AM") < t("12:00 PM"));
    }
}

#[cfg(test)]
mod rows {
    use crate::{CoreError, HeaderMap, Row, parse_rows, write_rows};

    fn cells(rows: &[Row]) -> Vec<Vec<String>> {
        rows.iter().map(|r| r.cells.clone()).collect()
    }

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter().map(|r| r.iter().map(|c| c.to_string()).collect()).collect()
    }

    #[test]
    fn newline_styles_are_equivalent() {
        let expected = grid(&[&["a", "b"], &["c", "d"], &["e", "f"]]);
        for text in [
            "a,b\nc,d\ne,f\n",
            "a,b\rc,d\re,f\r",
            "a,b\r\nc,d\r\ne,f\r\n",
            "a,b\nc,d\r\ne,f\r",
            "a,b\nc,d\ne,f",
        ] {
            assert_eq!(cells(&parse_rows(text).unwrap()), expected, "{text:?}");
        }
    }

    #[test]
    fn quoted_fields() {
        let rows = parse_rows("\"Smith, Jo\",\"say \"\"hi\"\"\",plain\n").unwrap();
        assert_eq!(cells(&rows), grid(&[&["Smith, Jo", "say \"hi\"", "plain"]]));
    }

    #[test]
    fn round_trip_edge_cases() {
        let original = grid(&[
            &["Consumer", "Driver", "Name"],
            &["", "", "leading empties"],
            &["trailing empties", "", ""],
            &["comma, inside", "quote \" inside", "both, \"x\""],
            &[""],
            &["", "", "", ""],
            &["line\nbreak", "x"],
        ]);
        let text = write_rows(&original).unwrap();
        assert_eq!(cells(&parse_rows(&text).unwrap()), original);

        for terminator in ["\r\n", "\r"] {
            let text = text.replace('\n', terminator);
            // Embedded newline rewritten too; compare against the same rewrite.
            let expected: Vec<Vec<String>> = original
                .iter()
                .map(|r| r.iter().map(|c| c.replace('\n', terminator)).collect())
                .collect();
            assert_eq!(cells(&parse_rows(&text).unwrap()), expected, "{terminator:?}");
        }
    }

    #[test]
    fn line_numbers_are_one_based() {
        let rows = parse_rows("h1,h2\n,\nx,y\n").unwrap();
        let lines: Vec<usize> = rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 2, 3]);

        let rows = parse_rows("h1,h2\rx,y\r").unwrap();
        let lines: Vec<usize> = rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn line_numbers_with_mixed_terminators() {
        let lines = |text: &str| -> Vec<usize> { parse_rows(text).unwrap().iter().map(|r| r.line).collect() };

        assert_eq!(lines("h1,h2\ra,b\nc,d\re,f\ng,h\n"), vec![1, 2, 3, 4, 5]);
        assert_eq!(lines("h1,h2\r\na,b\rc,d\r\ne,f\n"), vec![1, 2, 3, 4]);
        // The quoted newline still moves the line counter.
        assert_eq!(lines("h1,h2\r\"x\ny\",b\rc,d\r"), vec![1, 2, 4]);
        // Skipped blank lines count too.
        assert_eq!(lines("h1,h2\r\n\r\nx,y\r\n"), vec![1, 3]);
    }

    #[test]
    fn empty_rows() {
        let rows = parse_rows("a,b\n,\n  , \n").unwrap();
        assert!(!rows[0].is_empty());
        assert!(rows[1].is_empty());
        assert!(rows[2].is_empty());
        assert_eq!(rows[1].cell(7), "");
    }

    #[test]
    fn header_lookup_is_order_independent() {
        let header = Row::new(1, vec!["B".into(), " A ".into()]);
        let map = HeaderMap::from_row(&header);
        map.require(&["A", "B"]).unwrap();

        let row = Row::new(2, vec![" two ".into(), "one".into()]);
        assert_eq!(map.get(&row, "A"), "one");
        assert_eq!(map.get(&row, "B"), "two");
        assert_eq!(map.get(&row, "C"), "");
    }

    #[test]
    fn header_missing_columns_listed_together() {
        let map = HeaderMap::from_row(&Row::new(3, vec!["Name".into(), "Phne #".into()]));
        let err = map.require(&["Name", "Phone #", "City"]).unwrap_err();
        match err {
            CoreError::MissingColumns { line, columns } => {
                assert_eq!(line, 3);
                assert_eq!(columns, "Phone #, City");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn not_a_header() {
        let map = HeaderMap::from_row(&Row::new(1, vec!["FALSE".into(), "Cafe Raj".into()]));
        let err = map.require(&["Name", "City"]).unwrap_err();
        assert!(err.to_string().contains("does not look like a header row"));
    }

    #[test]
    fn bool_cells() {
        let map = HeaderMap::from_row(&Row::new(1, vec!["Consumer".into(), "Driver".into()]));
        let row = Row::new(2, vec!["true".into(), "".into()]);
        assert!(map.get_bool(&row, "Consumer").unwrap());
        assert!(!map.get_bool(&row, "Driver").unwrap());

        let bad = Row::new(9, vec!["yes".into()]);
        let err = map.get_bool(&bad, "Consumer").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 9: invalid Consumer value \"yes\", expected TRUE or FALSE"
        );
    }
}

#[cfg(test)]
mod roster {
    use crate::{DRIVERS_GROUP, Member, MemberRoster};

    #[test]
    fn driver_membership() {
        let roster = MemberRoster::new()
            .with_member(Member::new("jsDriver", "510-555-1212").in_group(DRIVERS_GROUP))
            .with_member(Member::new("jbDispatcher", "510-555-0000"));

        assert_eq!(roster.len(), 2);
        assert!(roster.is_driver("jsDriver"));
        assert!(!roster.is_driver("jbDispatcher"));
        assert!(!roster.is_driver("nobody"));
        assert!(roster.contains("jbDispatcher"));
        assert_eq!(roster.get("jsDriver").unwrap().phone, "510-555-1212");
    }
}

#[cfg(test)]
mod version {
    use crate::parse_version;

    #[test]
    fn spellings_collapse_to_integers() {
        assert_eq!(parse_version("1"), Some(1));
        assert_eq!(parse_version("2-0-0"), Some(200));
        assert_eq!(parse_version("3.0.0"), Some(300));
        assert_eq!(parse_version(" 301 "), Some(301));
        assert_eq!(parse_version("3-1-0"), Some(310));
    }

    #[test]
    fn rejects_non_versions() {
        for bad in ["", "v3", "3-0", "3-10-0", "three", "-1"] {
            assert_eq!(parse_version(bad), None, "{bad:?}");
        }
    }
}
