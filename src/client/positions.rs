use super::{Client, Reject};
use crate::error::Result;
use crate::types::{
    AccountID, ClosePositionRequest, ClosePositionResponse, InstrumentName, PositionResponse, PositionsResponse,
};
use reqwest::Method;

impl Client {
    /// Every Position the account has held, including flat ones.
    pub async fn positions(&self, account: &AccountID) -> Result<PositionsResponse> {
        self.get(&["accounts", account.as_str(), "positions"]).await
    }

    pub async fn open_positions(&self, account: &AccountID) -> Result<PositionsResponse> {
        self.get(&["accounts", account.as_str(), "openPositions"]).await
    }

    pub async fn position(&self, account: &AccountID, instrument: &InstrumentName) -> Result<PositionResponse> {
        self.get(&["accounts", account.as_str(), "positions", instrument.as_str()])
            .await
    }

    pub async fn close_position(
        &self,
        account: &AccountID,
        instrument: &InstrumentName,
        request: &ClosePositionRequest,
    ) -> Result<ClosePositionResponse> {
        self.send(
            Method::PUT,
            &["accounts", account.as_str(), "positions", instrument.as_str(), "close"],
            request,
            Reject::ClosePosition,
        )
        .await
    }
}
