use crate::record::Record;
use crate::request::{Input, Subject};
use log::{trace, warn};
use std::fmt::{self, Display};

/// The four facts about an input's shape that pick a rendering strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// A structured request rather than a bare record.
    pub structured: bool,
    /// The request names a non-empty view.
    pub has_view: bool,
    /// The request carries a non-empty nested object.
    pub has_object: bool,
    /// The nested object is a sequence (independent of `has_object`).
    pub object_is_sequence: bool,
}

impl Signature {
    pub fn of(input: &Input<'_>) -> Self {
        match input {
            Input::Absent | Input::Record(_) => Self {
                structured: false,
                has_view: false,
                has_object: false,
                object_is_sequence: false,
            },
            Input::Sequence(_) => Self {
                structured: true,
                has_view: false,
                has_object: false,
                object_is_sequence: false,
            },
            Input::Request(request) => Self {
                structured: true,
                has_view: request.view.as_deref().is_some_and(|view| !view.is_empty()),
                has_object: request.object.as_ref().is_some_and(|object| !object.is_empty()),
                object_is_sequence: matches!(request.object, Some(Subject::Many(_))),
            },
        }
    }
}

impl Display for Signature {
    /// Bit string in field order, e.g. `1110`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in [self.structured, self.has_view, self.has_object, self.object_is_sequence] {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// How an input gets rendered.
pub enum Strategy<'r, 'a> {
    /// Nothing to render.
    Empty,
    /// A bare record, by type with the default view.
    Record(&'a dyn Record),
    /// A bare sequence, each by type with the default view.
    Sequence(&'r [&'a dyn Record]),
    /// A nested record, by type with the default view.
    Object(&'a dyn Record),
    /// A nested sequence, each by type with the default view.
    ObjectSequence(&'r [&'a dyn Record]),
    /// A nested record, by type with the explicit view.
    ObjectView(&'a dyn Record, &'r str),
    /// A nested sequence, each with the explicit shared view.
    ObjectSequenceView(&'r [&'a dyn Record], &'r str),
}

impl Strategy<'_, '_> {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Empty => "empty",
            Strategy::Record(_) => "record",
            Strategy::Sequence(_) => "sequence",
            Strategy::Object(_) => "object",
            Strategy::ObjectSequence(_) => "object-sequence",
            Strategy::ObjectView(..) => "object-view",
            Strategy::ObjectSequenceView(..) => "object-sequence-view",
        }
    }
}

/// Picks the rendering strategy for an input.
///
/// Signatures outside the six recognized shapes yield `Strategy::Empty`
/// and are logged at warn level.
pub fn classify<'r, 'a>(input: &'r Input<'a>) -> Strategy<'r, 'a> {
    let request = match input {
        Input::Absent => return Strategy::Empty,
        Input::Record(record) => return Strategy::Record(*record),
        Input::Sequence(sequence) if sequence.is_empty() => return Strategy::Empty,
        Input::Sequence(sequence) => {
            trace!("Input signature {} selects sequence", Signature::of(input));
            return Strategy::Sequence(&sequence.items);
        }
        Input::Request(request) if request.is_empty() => return Strategy::Empty,
        Input::Request(request) => request,
    };

    let signature = Signature::of(input);
    let view = request.view.as_deref().unwrap_or_default();
    let strategy = match (signature.has_view, signature.has_object, &request.object) {
        // Options alone: a sequence with no records.
        (false, false, None) => Strategy::Sequence(&[]),
        (false, true, Some(Subject::One(record))) => Strategy::Object(*record),
        (false, true, Some(Subject::Many(records))) => Strategy::ObjectSequence(records),
        (true, true, Some(Subject::One(record))) => Strategy::ObjectView(*record, view),
        (true, true, Some(Subject::Many(records))) => Strategy::ObjectSequenceView(records, view),
        _ => {
            warn!("Unrecognized input signature {signature}; nothing to render");
            return Strategy::Empty;
        }
    };
    trace!("Input signature {signature} selects {}", strategy.name());
    strategy
}
