//! Per-user token buckets for message sending.

use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use rocket::http::Status;
use rocket::request::{self, FromRequest, Outcome, Request};
use vohala_database::User;
use vohala_result::Error;

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

struct Bucket {
    tokens: u32,
    window: f64,
}

/// Fixed-window buckets keyed by user id.
pub struct RatelimitState {
    buckets: DashMap<i64, Bucket>,
    rate: u32,
    per: f64,
}

impl RatelimitState {
    pub fn new() -> RatelimitState {
        let config = &vohala_config::config().features.ratelimits;
        RatelimitState::with_limits(config.message_send as u32, config.message_send_per as f64)
    }

    pub fn with_limits(rate: u32, per: f64) -> RatelimitState {
        RatelimitState {
            buckets: DashMap::new(),
            rate,
            per,
        }
    }

    /// Take one token for this user; on an empty bucket, returns the seconds
    /// remaining until the window resets.
    fn take(&self, user_id: i64) -> Result<(), f64> {
        let current = now();
        let mut bucket = self.buckets.entry(user_id).or_insert(Bucket {
            tokens: self.rate,
            window: current,
        });

        if current > bucket.window + self.per {
            bucket.tokens = self.rate;
            bucket.window = current;
        }

        if bucket.tokens == 0 {
            return Err((bucket.window + self.per - current).max(0.0));
        }

        bucket.tokens -= 1;
        Ok(())
    }
}

impl Default for RatelimitState {
    fn default() -> RatelimitState {
        RatelimitState::new()
    }
}

/// Request guard consuming one token for the calling user.
pub struct Ratelimiter;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Ratelimiter {
    type Error = Error;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let user = match request.guard::<User>().await {
            Outcome::Success(user) => user,
            _ => {
                return Outcome::Error((
                    Status::Unauthorized,
                    create_error!(NotAuthenticated),
                ))
            }
        };

        let state = request
            .rocket()
            .state::<RatelimitState>()
            .expect("`RatelimitState`");

        match state.take(user.id) {
            Ok(()) => Outcome::Success(Ratelimiter),
            Err(retry_after) => Outcome::Error((
                Status::TooManyRequests,
                create_error!(TooManyRequests { retry_after }),
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bucket_drains_and_refills() {
        let state = RatelimitState::with_limits(2, 0.05);

        assert!(state.take(1).is_ok());
        assert!(state.take(1).is_ok());
        let retry_after = state.take(1).expect_err("bucket should be empty");
        assert!(retry_after <= 0.05);

        // A different user has their own bucket.
        assert!(state.take(2).is_ok());

        std::thread::sleep(std::time::Duration::from_millis(60));
        assert!(state.take(1).is_ok());
    }
}
