/// Wall-clock source for stamping new posts.
pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;
}
