//! Conversion infrastructure - Built-in converters, tag removers and their factory

mod converters;
mod factory;
mod post_converters;
mod tag_removers;

pub use converters::{AssConverter, MicroDvdConverter, SbvConverter, SrtConverter, VttConverter};
pub use factory::ConverterFactory;
pub use post_converters::{TagRemovalPostConverter, ToOneLineConverter};
pub use tag_removers::TableTagRemover;
