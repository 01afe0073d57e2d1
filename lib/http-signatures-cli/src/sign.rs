use crate::{args::SignArgs, util};
use http::header::{AUTHORIZATION, DATE};
use http_signatures::{cavage, crypto};

pub async fn do_it(args: SignArgs) -> miette::Result<()> {
    let pem = util::read_pem(&args.private_key).await?;
    let key = crypto::parse::private_key(&pem)?;

    let mut request = util::build_request(args.request)?;
    let headers: Vec<&str> = args.sign_headers.split(' ').collect();
    cavage::sign(&mut request, &args.key_id, args.algorithm, &headers, &key)?;

    for name in [DATE, AUTHORIZATION] {
        if let Some(value) = request.headers().get(&name) {
            // Both values were built from strings
            println!("{name}: {}", value.to_str().unwrap_or_default());
        }
    }

    Ok(())
}
