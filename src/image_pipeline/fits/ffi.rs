//! Header-level cfitsio calls that the safe `fitsio` API does not cover.
//!
//! All functions operate on the file's current HDU.

use std::ffi::{CStr, CString, c_char, c_int};

use fitsio::FitsFile;
use fitsio::sys;

use crate::image_pipeline::common::error::{Result, SplitError};

/// cfitsio's FLEN_CARD / FLEN_ERRMSG, including the terminating NUL.
const FLEN_CARD: usize = 81;
const FLEN_ERRMSG: usize = 81;

fn check_status(status: c_int, operation: &str) -> Result<()> {
    if status == 0 {
        return Ok(());
    }
    let mut text = [0 as c_char; FLEN_ERRMSG];
    unsafe { sys::ffgerr(status, text.as_mut_ptr()) };
    let message = unsafe { CStr::from_ptr(text.as_ptr()) }.to_string_lossy();
    Err(SplitError::Container(format!(
        "{operation} failed: {message} (status {status})"
    )))
}

fn to_cstring(text: &str) -> Result<CString> {
    CString::new(text).map_err(|e| SplitError::Container(e.to_string()))
}

/// Reads every header record of the current HDU, excluding `END`.
pub(crate) fn read_records(fptr: &mut FitsFile) -> Result<Vec<String>> {
    let mut status: c_int = 0;
    let mut existing: c_int = 0;
    let mut more: c_int = 0;
    unsafe { sys::ffghsp(fptr.as_raw(), &mut existing, &mut more, &mut status) };
    check_status(status, "read header size")?;

    let mut records = Vec::with_capacity(existing.max(0) as usize);
    for index in 1..=existing {
        let mut card = [0 as c_char; FLEN_CARD];
        unsafe { sys::ffgrec(fptr.as_raw(), index, card.as_mut_ptr(), &mut status) };
        check_status(status, "read header record")?;
        let record = unsafe { CStr::from_ptr(card.as_ptr()) };
        records.push(record.to_string_lossy().into_owned());
    }
    Ok(records)
}

/// Appends a preformatted 80-column record.
pub(crate) fn write_record(fptr: &mut FitsFile, record: &str) -> Result<()> {
    let record = to_cstring(record)?;
    let mut status: c_int = 0;
    unsafe { sys::ffprec(fptr.as_raw(), record.as_ptr(), &mut status) };
    check_status(status, "write header record")
}

/// Appends a HISTORY entry; cfitsio wraps long text over several cards.
pub(crate) fn write_history(fptr: &mut FitsFile, text: &str) -> Result<()> {
    let text = to_cstring(text)?;
    let mut status: c_int = 0;
    unsafe { sys::ffphis(fptr.as_raw(), text.as_ptr(), &mut status) };
    check_status(status, "write history")
}

/// Computes and stores the CHECKSUM and DATASUM keywords.
pub(crate) fn write_checksum(fptr: &mut FitsFile) -> Result<()> {
    let mut status: c_int = 0;
    unsafe { sys::ffpcks(fptr.as_raw(), &mut status) };
    check_status(status, "write checksum")
}
