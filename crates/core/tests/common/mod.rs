//! Shared test helpers for `archive_labels_core` integration tests.

#![allow(unreachable_pub, dead_code)]

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use archive_labels_core::{
    LabelCount, LabelError, PrintContext, PrintSurface, SymbolOptions, Surface,
    SymbologyRenderer,
};
use chrono::NaiveDate;

/// Calendar date shorthand.
pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Count shorthand.
pub fn count(n: i64) -> LabelCount {
    LabelCount::new(n).expect("valid test count")
}

/// Renderer that draws a placeholder recording the payload, and refuses
/// any payload listed in `reject`.
#[derive(Default)]
pub struct StubRenderer {
    pub reject: Vec<String>,
    pub calls: RefCell<Vec<(String, String)>>,
}

impl SymbologyRenderer for StubRenderer {
    fn render(
        &self,
        target: &mut Surface,
        payload: &str,
        options: &SymbolOptions,
    ) -> Result<(), LabelError> {
        self.calls
            .borrow_mut()
            .push((target.id().to_string(), payload.to_string()));
        if self.reject.iter().any(|r| r == payload) {
            return Err(LabelError::Render {
                payload: payload.to_string(),
                reason: "rejected by stub".into(),
            });
        }
        target.draw(format!(
            "<svg id=\"{}\" data-payload=\"{payload}\" data-width=\"{}\"></svg>",
            target.id(),
            options.module_width
        ));
        Ok(())
    }
}

/// Print surface that keeps written documents in memory.
#[derive(Default, Clone)]
pub struct MemorySurface {
    pub documents: Rc<RefCell<Vec<String>>>,
    pub blocked: bool,
    pub fail_write: bool,
}

pub struct MemoryContext {
    buffer: String,
    documents: Rc<RefCell<Vec<String>>>,
    fail_write: bool,
}

impl PrintSurface for MemorySurface {
    type Context = MemoryContext;

    fn open(&mut self, _title: &str) -> Result<MemoryContext, LabelError> {
        if self.blocked {
            return Err(LabelError::PrintSurfaceUnavailable {
                reason: "popup blocked".into(),
                source: None,
            });
        }
        Ok(MemoryContext {
            buffer: String::new(),
            documents: Rc::clone(&self.documents),
            fail_write: self.fail_write,
        })
    }
}

impl PrintContext for MemoryContext {
    fn write_document(&mut self, html: &str) -> Result<(), LabelError> {
        if self.fail_write {
            return Err(LabelError::PrintSurfaceUnavailable {
                reason: "memory".into(),
                source: Some(io::Error::other("write refused")),
            });
        }
        self.buffer.push_str(html);
        Ok(())
    }

    fn close(self) -> Result<String, LabelError> {
        self.documents.borrow_mut().push(self.buffer);
        Ok("memory".into())
    }
}
