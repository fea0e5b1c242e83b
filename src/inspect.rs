use alloc::vec::Vec;

use crate::decode::Pixels;
use crate::error::BmpError;
use crate::limits::Limits;
use crate::validate::{Advisory, BmpInfo, ValidationEvent, validate_with};
use crate::view::RawBufferView;

/// Validate a BMP buffer and, if it passes, hand out its pixel decoder.
///
/// ```
/// use bmpinfo::InspectRequest;
///
/// let data: &[u8] = b"BX";
/// let err = InspectRequest::new(data).inspect().unwrap_err();
/// assert!(err.is_structural());
/// ```
#[derive(Clone, Debug)]
pub struct InspectRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> InspectRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn inspect(self) -> Result<Inspection<'a>, BmpError> {
        self.inspect_with(|_| {})
    }

    /// Like [`inspect`](Self::inspect), also forwarding every validation
    /// event to `events` as it happens.
    pub fn inspect_with(
        self,
        mut events: impl FnMut(ValidationEvent),
    ) -> Result<Inspection<'a>, BmpError> {
        let mut advisories = Vec::new();
        let info = validate_with(self.data, |event| {
            if let ValidationEvent::Advisory(a) = event {
                advisories.push(a);
            }
            events(event);
        })?;
        if let Some(limits) = self.limits {
            limits.check(info.width, info.abs_height())?;
        }
        Ok(Inspection {
            view: RawBufferView::new(self.data),
            info,
            advisories,
        })
    }
}

/// A buffer that passed validation.
#[derive(Clone, Debug)]
pub struct Inspection<'a> {
    view: RawBufferView<'a>,
    pub info: BmpInfo,
    pub advisories: Vec<Advisory>,
}

impl<'a> Inspection<'a> {
    /// A fresh decoder over the pixels, top row first.
    pub fn pixels(&self) -> Pixels<'a> {
        Pixels::new(self.view, &self.info)
    }

    pub fn view(&self) -> RawBufferView<'a> {
        self.view
    }
}
