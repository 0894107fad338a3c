//! Haystack core library.
//!
//! Emits the text description of a "needle in a haystack" graph for
//! interpolated fitness graph evaluators: a favoured `start -> B -> finish`
//! path surrounded by numbered low-fitness distractor paths.
//!
//! ```
//! use haystack_core::{HaystackParams, render_to_string};
//!
//! let text = render_to_string(HaystackParams::new(1, 0.1, 7.0));
//! assert!(text.starts_with("add, start, 1\n"));
//! assert!(text.contains("add, finish, 10 \n"));
//! assert!(text.ends_with("add, N1, 0.1\nconnect, start, N1, 7\nconnect, N1, finish, 0\n"));
//! ```

mod directive;
mod emitter;
mod error;
mod params;

pub use crate::{
    directive::{Directive, DirectiveStyle, NodeName, Rendered, Value},
    emitter::{EmitSummary, HaystackEmitter, directives, render_to_string},
    error::{HaystackError, HaystackErrorCode, Result},
    params::{
        DEFAULT_NUM_OTHER_PATHS, DEFAULT_OTHER_PATH_FITNESS, DEFAULT_PATH_LENGTH,
        HaystackParams, HaystackParamsBuilder,
    },
};
