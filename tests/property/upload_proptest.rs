//! Property-based tests for upload naming

use ecom::backend::upload::storage::{ImageExtension, ImageStore, GENERATED_NAME_LEN};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_only_png_and_jpg_are_accepted(stem in "[a-zA-Z0-9_ -]{0,20}", ext in "[a-zA-Z]{1,5}") {
        let parsed = ImageExtension::from_filename(&format!("{}.{}", stem, ext));
        match ext.to_ascii_lowercase().as_str() {
            "png" => prop_assert_eq!(parsed, Some(ImageExtension::Png)),
            "jpg" => prop_assert_eq!(parsed, Some(ImageExtension::Jpg)),
            _ => prop_assert_eq!(parsed, None),
        }
    }

    #[test]
    fn test_names_without_a_dot_are_rejected(name in "[a-zA-Z0-9_ -]{0,30}") {
        prop_assert_eq!(ImageExtension::from_filename(&name), None);
    }

    #[test]
    fn test_generated_names_are_lowercase_hex(_ in 0..50u32) {
        let name = ImageStore::generate_filename(ImageExtension::Png);
        let (stem, ext) = name.split_once('.').unwrap();
        prop_assert_eq!(ext, "png");
        prop_assert_eq!(stem.len(), GENERATED_NAME_LEN);
        prop_assert!(stem.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn test_generated_names_differ(_ in 0..20u32) {
        let a = ImageStore::generate_filename(ImageExtension::Jpg);
        let b = ImageStore::generate_filename(ImageExtension::Jpg);
        prop_assert_ne!(a, b);
    }
}
