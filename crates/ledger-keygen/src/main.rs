//! Standalone keypair generator: prints a fresh RSA-2048 private/public PEM
//! pair, for clients that need to sign transactions without embedding the
//! node's own `/generate_keys` endpoint.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let keys = ledger_crypto::generate_keypair()?;
    println!("{}", keys.private_key_pem);
    println!("{}", keys.public_key_pem);
    Ok(())
}
