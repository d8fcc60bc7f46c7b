//! Optional feature modules live here.
//!
//! Extensions consume generated segments and never feed back into them.

pub mod adornments;

pub use adornments::{
    Adornment, AdornmentPosition, build_adornments, label_anchor, place_vertex_adornments,
};
