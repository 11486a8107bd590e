//! Provenance metadata written into every extracted plane.

use crate::image_pipeline::fits::Header;
use crate::image_pipeline::superpixel::Channel;

/// CREATOR value identifying planes written by this tool.
pub const CREATOR_TAG: &str = "RGB Splitter";

pub const FILTER_KEY: &str = "FILTER";
pub const CREATOR_KEY: &str = "CREATOR";
pub const PARENT_KEY: &str = "PARENT";

const FILTER_COMMENT: &str = "Extracted RGB Channel";
const CREATOR_COMMENT: &str = "Software used for splitting";
const PARENT_COMMENT: &str = "Original CFA file name";

const SOFTWARE_REF: &str = env!("CARGO_PKG_REPOSITORY");

/// True when the header carries this tool's CREATOR tag.
pub fn is_already_processed(header: &Header) -> bool {
    header
        .get_str(CREATOR_KEY)
        .is_some_and(|creator| creator.contains(CREATOR_TAG))
}

/// Copies the source header and stamps it for one output channel.
pub fn channel_header(source: &Header, channel: Channel, parent: &str, timestamp: &str) -> Header {
    let mut header = source.clone();

    header.set_str(FILTER_KEY, channel.as_str(), FILTER_COMMENT);
    header.set_str(CREATOR_KEY, CREATOR_TAG, CREATOR_COMMENT);
    header.set_str(PARENT_KEY, parent, PARENT_COMMENT);

    header.add_history(format!("[{timestamp}] CFA SPLIT PROCESS APPLIED"));
    header.add_history("Method: Superpixel Extraction (No Interpolation)");
    header.add_history(format!("Software Ref: {SOFTWARE_REF}"));
    header.add_history(format!("Channel: {channel} extracted from RGGB pattern"));
    if channel == Channel::Green {
        header.add_history("Note: Green channel is average of G1 and G2 pixels");
    }

    header
}
