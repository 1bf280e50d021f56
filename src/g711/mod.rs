//! G.711 companding, used standalone and by G.726 tandem adjust (see [`crate::g726`]).

pub mod alaw;
pub mod mulaw;
