pub mod assemble;
pub mod inspect;
