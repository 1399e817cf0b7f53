//
//  jenkins-cli
//  cli/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Token obfuscation commands
//!
//! The configured token is never stored in plain text. `token encode` produces
//! the hex form to put in the configuration file or `JENKINS_TOKEN`; `decode`
//! and `verify` help diagnose a token that is rejected by the server. All
//! three use the salt and key derivation from the configuration.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::auth::read_token_from_stdin;
use crate::codec::{KeyDerivation, Obfuscator};
use crate::output::{print_field, TextOutput};

use super::GlobalOptions;

/// Obfuscate and inspect API tokens
#[derive(Args, Debug)]
pub struct TokenCommand {
    #[command(subcommand)]
    pub command: TokenSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TokenSubcommand {
    /// Obfuscate a plain-text token
    Encode(EncodeArgs),

    /// Reveal the plain text of an obfuscated token
    Decode(DecodeArgs),

    /// Check that an obfuscated token is well formed
    Verify(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Plain-text token (read from stdin when omitted)
    pub plaintext: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Obfuscated token as a hex string
    pub hex: String,
}

#[derive(Debug, Serialize)]
struct EncodedToken {
    token: String,
    key_derivation: KeyDerivation,
}

impl TextOutput for EncodedToken {
    fn print_text(&self, _color: bool) {
        println!("{}", self.token);
    }
}

#[derive(Debug, Serialize)]
struct DecodedToken {
    token: String,
}

impl TextOutput for DecodedToken {
    fn print_text(&self, _color: bool) {
        println!("{}", self.token);
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct TokenReport {
    valid: bool,
    length: usize,
    key_derivation: KeyDerivation,
    round_trips: bool,
}

impl TokenReport {
    fn inspect(codec: &Obfuscator, hex: &str) -> Result<Self> {
        let plaintext = codec
            .try_decode(hex)
            .context("Token is not a valid obfuscated value")?;

        Ok(Self {
            valid: true,
            length: plaintext.chars().count(),
            key_derivation: codec.derivation(),
            round_trips: codec.encode(&plaintext) == hex.to_ascii_lowercase(),
        })
    }
}

impl TextOutput for TokenReport {
    fn print_text(&self, color: bool) {
        if color {
            println!("{} Token is well formed", style("✓").green().bold());
        } else {
            println!("✓ Token is well formed");
        }
        print_field("Length", &self.length.to_string(), color);
        print_field("Key derivation", &self.key_derivation.to_string(), color);
        print_field(
            "Round-trips",
            if self.round_trips { "yes" } else { "no" },
            color,
        );
    }
}

impl TokenCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let codec = config.jenkins.codec();
        let writer = global.writer();

        match &self.command {
            TokenSubcommand::Encode(args) => {
                let plaintext = match &args.plaintext {
                    Some(p) => p.clone(),
                    None => read_token_from_stdin()?,
                };
                if plaintext.is_empty() {
                    bail!("Token cannot be empty");
                }

                writer.write(&EncodedToken {
                    token: codec.encode(&plaintext),
                    key_derivation: codec.derivation(),
                })
            }
            TokenSubcommand::Decode(args) => writer.write(&DecodedToken {
                token: codec.decode(&args.hex),
            }),
            TokenSubcommand::Verify(args) => {
                writer.write(&TokenReport::inspect(&codec, &args.hex)?)
            }
        }
    }
}
