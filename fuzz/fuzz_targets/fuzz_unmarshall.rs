#![no_main]
use arbitrary::Arbitrary;
use depthwalk::{
    Cursor, DecodeOptions, JsonLexer, LexerOptions, Token, TokenReplay, TokenSource,
    model::{self, cloudfront::DistributionConfigWithTags, ecs::TaskDefinition},
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzToken {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    Field(String),
    String(String),
    Number(i64),
    Boolean(bool),
    Null,
}

impl From<FuzzToken> for Token {
    fn from(t: FuzzToken) -> Self {
        match t {
            FuzzToken::StartObject => Token::StartObject,
            FuzzToken::EndObject => Token::EndObject,
            FuzzToken::StartArray => Token::StartArray,
            FuzzToken::EndArray => Token::EndArray,
            FuzzToken::Field(name) => Token::field(name),
            FuzzToken::String(s) => Token::string(s),
            FuzzToken::Number(n) => Token::number(n),
            FuzzToken::Boolean(b) => Token::boolean(b),
            FuzzToken::Null => Token::Null,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    allow_unicode_whitespace: bool,
    max_depth: u8,
    text: String,
    tokens: Vec<FuzzToken>,
}

fuzz_target!(|input: Input| {
    let registry = model::registry();
    let lexer_options = LexerOptions {
        allow_unicode_whitespace: input.allow_unicode_whitespace,
    };
    let decode_options = DecodeOptions {
        max_depth: usize::from(input.max_depth).max(1),
    };

    // Decoding arbitrary text never panics, whatever the outcome.
    let _ = registry.from_str_with::<TaskDefinition>(&input.text, lexer_options, decode_options);
    let _ = registry.from_str_with::<DistributionConfigWithTags>(
        &input.text,
        lexer_options,
        decode_options,
    );

    // Text serde_json accepts as one document must lex cleanly.
    if !input.allow_unicode_whitespace
        && serde_json::from_str::<serde_json::Value>(&input.text).is_ok()
    {
        let mut lexer = JsonLexer::new(&input.text);
        loop {
            match lexer.next_token() {
                Ok(Some(_)) => {}
                Ok(None) => break,
                Err(err) => panic!("lexer rejected valid JSON {:?}: {err}", input.text),
            }
        }
    }

    // Arbitrary token streams, including malformed ones.
    let tokens: Vec<Token> = input.tokens.into_iter().map(Token::from).collect();
    let mut cursor = Cursor::with_options(TokenReplay::from(tokens), decode_options);
    let _ = registry.decode::<TaskDefinition>(&mut cursor);
});
