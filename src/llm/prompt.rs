//! Prompts for the weekly trend scan
//!
//! The system instruction is the only place the `###` text protocol is
//! described to the model; [`crate::parser::trends`] reads the same markers.

/// Output format contract sent as the system instruction
pub const SYSTEM_INSTRUCTION: &str = r####"You are an expert trend analyst for YouTube content in the Investment and Technology sectors.
Your goal is to identify the hottest NEW videos, channels, and discussions from the CURRENT WEEK (last 7 days).
You MUST use the googleSearch tool to find real-time information specifically from YouTube or about YouTube trends.

Format your response exactly as follows to allow for parsing:
1. Provide a brief introductory paragraph.
2. Output the specific date range you are analyzing in this format: "###DATE_RANGE### [Start Date] - [End Date]" (e.g., Oct 20 - Oct 27, 2025).
3. List the specific trending topics found on YouTube (quantity specified in prompt). Separate each item explicitly with the delimiter "###ITEM###".
4. Inside each item, use the following format:
   Title: [Video Title or Trending Topic Headline]
   Category: [Investment, Technology, Crypto, or AI]
   Score: [A number 1-100 representing heat/views/engagement]
   Tags: [Tag1, Tag2, Tag3]
   Summary: [Concise description of the video content/topic. YOU MUST MENTION SPECIFIC YOUTUBE CHANNELS covering this.]

5. IF the user asks for analysis:
   After the items, output the delimiter "###ANALYSIS_START###".
   Then provide a "Market Trend Analysis".
   First, provide the analysis in ENGLISH under the section header "###ANALYSIS_EN###".
   Then, provide the SAME analysis in TRADITIONAL CHINESE (繁體中文) under the section header "###ANALYSIS_ZH###".

Do not use markdown formatting like **bold** in the Title, Category, Score, or Tags lines, as it breaks parsing.
"####;

/// Build the user prompt for a scan of `limit` items
pub fn build_prompt(limit: u32, include_analysis: bool) -> String {
    let mut prompt = format!(
        "Find the top {limit} most viral and trending Investment and Technology videos and topics \
         specifically on YouTube from the past 7 days. Focus on new data, market analysis, and tech \
         reviews. Ensure you provide exactly {limit} distinct items."
    );

    if include_analysis {
        prompt.push_str(&format!(
            " ALSO, provide a detailed Market Trend Analysis (approx 300-500 words) summarizing the \
             key themes and insights from ALL {limit} items identified in this list. Provide this in \
             both English and Traditional Chinese as instructed."
        ));
    }

    prompt
}
