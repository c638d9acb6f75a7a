pub mod ratelimit;

#[cfg(test)]
pub mod test;
