pub mod card_grid;
pub mod match_card;
