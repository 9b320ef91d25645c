use chrono::NaiveDate;
use lmarc_domain::inventory::ModelInventory;
use lmarc_inventory::{parse_listing, parse_markdown, render_markdown};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parser_never_panics(text in "(?s).{0,300}") {
        let _ = parse_listing(&text);
    }

    #[test]
    fn every_data_line_becomes_one_entry(
        rows in prop::collection::vec(
            ("[a-z][a-z0-9.-]{0,12}:[a-z0-9]{1,4}", "[0-9a-f]{12}", 1u32..9000, "(MB|GB)"),
            0..8,
        )
    ) {
        let mut listing = String::from("NAME    ID    SIZE    MODIFIED\n");
        for (name, id, size, unit) in &rows {
            listing.push_str(&format!("{name}    {id}    {size} {unit}    2 days ago\n"));
        }

        let entries = parse_listing(&listing);
        prop_assert_eq!(entries.len(), rows.len());
        for (entry, (name, id, _, _)) in entries.iter().zip(&rows) {
            prop_assert_eq!(&entry.name, name);
            prop_assert_eq!(entry.id.as_deref(), Some(id.as_str()));
            prop_assert!(entry.size_gb.is_some());
            prop_assert_eq!(entry.modified.as_deref(), Some("2 days ago"));
        }

        let day = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let inventory = ModelInventory::new(day, entries);
        let back = parse_markdown(day, &render_markdown(&inventory)).unwrap();
        prop_assert_eq!(back.names(), inventory.names());
    }
}
