use crate::dto::HealthRes;

/// Simple health service shared by the APIs.
///
/// This service provides a standardised way to check the health status of the diagnosis service.
pub struct HealthService;

impl HealthService {
    /// Check health without any service state.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Endo diagnosis service is alive".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_healthy() {
        let res = HealthService::check_health();
        assert!(res.ok);
        assert!(res.message.contains("alive"));
    }
}
