use crate::{args::PublicKeyArgs, util};
use http_signatures::crypto;

pub async fn do_it(args: PublicKeyArgs) -> miette::Result<()> {
    let pem = util::read_pem(&args.private_key).await?;
    let key = crypto::parse::private_key(&pem)?;

    print!("{}", crypto::parse::public_key_pem(&key)?);

    Ok(())
}
