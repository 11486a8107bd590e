//! FITS container module
//!
//! Reading and writing of 2-D images with their header cards. The pipeline
//! only talks to the `CfaImageReader` and `PlaneWriter` traits; the `fitsio`
//! implementations are the production backends.

mod ffi;
mod fitsio_reader;
mod fitsio_writer;
pub mod header;
mod reader;
pub mod types;
mod writer;

pub use fitsio_reader::FitsioReader;
pub use fitsio_writer::FitsioWriter;
pub use header::{Card, Header};
pub use reader::CfaImageReader;
pub use types::{ContainerSlots, ImageSlot, PixelData, PlaneImage};
pub use writer::PlaneWriter;
