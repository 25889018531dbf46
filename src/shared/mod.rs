pub mod constants;
pub mod dates;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
