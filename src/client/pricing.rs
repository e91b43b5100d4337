use super::{Client, Reject};
use crate::error::Result;
use crate::stream::EventStream;
use crate::types::{
    AccountID, CandlesQuery, CandlesResponse, ClientPrice, InstrumentName, LatestCandlesQuery, LatestCandlesResponse,
    PricingQuery, PricingResponse, PricingStreamQuery,
};

impl Client {
    pub async fn latest_candles(&self, account: &AccountID, query: &LatestCandlesQuery) -> Result<LatestCandlesResponse> {
        self.get_with(&["accounts", account.as_str(), "candles", "latest"], query, Reject::Api)
            .await
    }

    /// Current prices for a set of instruments.
    pub async fn pricing(&self, account: &AccountID, query: &PricingQuery) -> Result<PricingResponse> {
        self.get_with(&["accounts", account.as_str(), "pricing"], query, Reject::Api)
            .await
    }

    /// Candles as priced for this account.
    pub async fn account_candles(
        &self,
        account: &AccountID,
        instrument: &InstrumentName,
        query: &CandlesQuery,
    ) -> Result<CandlesResponse> {
        self.get_with(
            &["accounts", account.as_str(), "instruments", instrument.as_str(), "candles"],
            query,
            Reject::Api,
        )
        .await
    }

    /// Stream prices for the requested instruments. Heartbeats are dropped.
    pub async fn pricing_stream(
        &self,
        account: &AccountID,
        query: &PricingStreamQuery,
    ) -> Result<EventStream<ClientPrice>> {
        self.open_stream(&["accounts", account.as_str(), "pricing", "stream"], query)
            .await
    }
}
