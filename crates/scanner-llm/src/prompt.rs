//! Analysis prompt construction

use scanner_stream::MarketType;

fn market_name(market: MarketType) -> &'static str {
    match market {
        MarketType::A => "China A-share",
        MarketType::US => "US",
        MarketType::HK => "Hong Kong",
        MarketType::ETF => "ETF fund",
        MarketType::LOF => "LOF fund",
    }
}

/// Build the analysis prompt for one code.
///
/// The closing instruction asks for a `Score: N` line so the producer can
/// lift a numeric rating out of the generated text.
pub fn analysis_prompt(code: &str, market: MarketType) -> String {
    format!(
        "You are an experienced equity analyst. Analyze the {} security `{}`.\n\
         Cover recent price action, fundamentals, sector context, and key risks,\n\
         then conclude with an overall rating on its own line as `Score: N`\n\
         where N is an integer from 0 (strong sell) to 100 (strong buy).",
        market_name(market),
        code,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_code_and_market() {
        let prompt = analysis_prompt("600000.SH", MarketType::A);
        assert!(prompt.contains("600000.SH"));
        assert!(prompt.contains("China A-share"));
        assert!(prompt.contains("Score: N"));
    }
}
