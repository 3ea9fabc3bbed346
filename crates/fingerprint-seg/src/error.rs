/// Errors returned by the segmenter.
#[derive(thiserror::Error, Debug)]
pub enum SegmentError {
    #[error("input length {got} does not match working resolution {width}x{height} ({expected} bytes)")]
    InputSize {
        got: usize,
        expected: usize,
        width: usize,
        height: usize,
    },
    #[error("image has more than {max} connected regions")]
    LabelOverflow { max: usize },
}
