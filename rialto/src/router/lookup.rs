use rialto_core::{Filter, RialtoError};

use crate::Rialto;
use crate::params::{lookup_code, non_empty};
use crate::response::Lookup;

impl Rialto {
    /// Find one stock code document from a raw query string such as `VNM&marketId=HOSE`.
    ///
    /// # Errors
    /// `InvalidArg` when no code can be read from the query, `NotFound` when
    /// nothing matches, otherwise store failures.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "rialto::lookup", skip(self))
    )]
    pub async fn lookup(
        &self,
        raw_query: &str,
        market_id: Option<&str>,
    ) -> Result<Lookup, RialtoError> {
        let code = lookup_code(raw_query)
            .ok_or_else(|| RialtoError::invalid_arg("missing stock code"))?;
        let mut filter = Filter::new().eq("Symbol", code);
        if let Some(m) = non_empty(market_id) {
            filter = filter.eq("MarketId", m);
        }
        let data = self
            .store
            .find_one(&self.cfg.sources.stock_code, &filter)
            .await
            .map_err(|e| match e {
                RialtoError::NotFound { .. } => RialtoError::not_found(format!("stock code {code}")),
                other => other,
            })?;
        Ok(Lookup { data })
    }
}
