use super::{Client, Reject};
use crate::error::Result;
use crate::types::{
    BookQuery, CandlesQuery, CandlesResponse, InstrumentName, OrderBook, OrderBookResponse, PositionBook,
    PositionBookResponse,
};

impl Client {
    pub async fn candles(&self, instrument: &InstrumentName, query: &CandlesQuery) -> Result<CandlesResponse> {
        self.get_with(&["instruments", instrument.as_str(), "candles"], query, Reject::Api)
            .await
    }

    pub async fn order_book(&self, instrument: &InstrumentName, query: &BookQuery) -> Result<OrderBook> {
        let response: OrderBookResponse = self
            .get_with(&["instruments", instrument.as_str(), "orderBook"], query, Reject::Api)
            .await?;
        Ok(response.order_book)
    }

    pub async fn position_book(&self, instrument: &InstrumentName, query: &BookQuery) -> Result<PositionBook> {
        let response: PositionBookResponse = self
            .get_with(&["instruments", instrument.as_str(), "positionBook"], query, Reject::Api)
            .await?;
        Ok(response.position_book)
    }
}
