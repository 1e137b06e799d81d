// Resume ↔ job description analysis.
// Segmentation, contact extraction, keyphrase comparison, section weighting and
// usage deficits. Only the comparator reaches the keyphrase extractor.

pub mod catalog;
pub mod comparator;
pub mod completeness;
pub mod contact;
pub mod handlers;
pub mod keywords;
pub mod orchestrator;
pub mod segmenter;
pub mod usage;
pub mod weighting;
