pub(crate) mod projection;
pub(crate) mod resample;
