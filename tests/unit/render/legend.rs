use super::*;

#[test]
fn default_legend_has_21_entries_and_wraps() {
    let l = Legend::default();
    assert_eq!(l.len(), 21);
    assert_eq!(l.color_for(0), [255, 197, 0, 255]);
    assert_eq!(l.color_for(20), [0, 161, 194, 255]);
    assert_eq!(l.color_for(21), l.color_for(0));
    assert_eq!(l.color_for(255), l.color_for(255 % 21));
}

#[test]
fn empty_legend_is_rejected() {
    assert!(Legend::new(vec![]).is_err());
    assert!(serde_json::from_str::<Legend>("[]").is_err());
    let l: Legend = serde_json::from_str("[[1,2,3,4]]").unwrap();
    assert_eq!(l.color_for(9), [1, 2, 3, 4]);
}

#[test]
fn labels_line_up_with_the_palette() {
    let labels = pascal_voc_labels();
    assert_eq!(labels.len(), LEGEND_COLORS.len());
    assert_eq!(label_for(&labels, 15), Some("person"));
    assert_eq!(label_for(&labels, 40), None);
}
