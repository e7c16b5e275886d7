use http::HeaderValue;
use url::Url;

use crate::Config;

impl Config {
    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream URL is not an absolute http(s) URL,
    /// the CORS origin is not a valid header value, the auth realm cannot be
    /// quoted, or the sampling rate is out of range
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_upstream()?;
        self.validate_cors()?;
        self.validate_auth()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_upstream(&self) -> anyhow::Result<()> {
        let url = Url::parse(&self.upstream.base_url)
            .map_err(|e| anyhow::anyhow!("invalid upstream base URL `{}`: {e}", self.upstream.base_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("upstream base URL must use http or https, got `{}`", url.scheme());
        }

        if url.query().is_some() || url.fragment().is_some() {
            anyhow::bail!("upstream base URL must not carry a query or fragment");
        }

        Ok(())
    }

    fn validate_cors(&self) -> anyhow::Result<()> {
        HeaderValue::from_str(&self.server.cors.origin)
            .map_err(|e| anyhow::anyhow!("invalid CORS origin `{}`: {e}", self.server.cors.origin))?;
        Ok(())
    }

    fn validate_auth(&self) -> anyhow::Result<()> {
        let Some(ref auth) = self.auth else {
            return Ok(());
        };

        if auth.username.contains(':') {
            anyhow::bail!("basic auth username must not contain ':'");
        }

        if auth.realm.contains('"') {
            anyhow::bail!("basic auth realm must not contain '\"'");
        }

        HeaderValue::from_str(&auth.realm).map_err(|e| anyhow::anyhow!("invalid basic auth realm: {e}"))?;

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(ref telemetry) = self.telemetry else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&telemetry.sampling_rate) {
            anyhow::bail!(
                "trace sampling rate must be between 0.0 and 1.0, got {}",
                telemetry.sampling_rate
            );
        }

        Ok(())
    }
}
