use crate::util::{error_kaomoji, success_kaomoji};
use http_signatures::cavage::{self, SignatureHeader};

pub fn do_it(header: &str) -> miette::Result<()> {
    let params = match cavage::split_authorization(header) {
        Some((scheme, params)) if cavage::is_signature_scheme(scheme) => params,
        _ => header,
    };

    let params = cavage::parse(params);
    let signature_header = match SignatureHeader::try_from(&params) {
        Ok(signature_header) => signature_header,
        Err(err) => {
            eprintln!("Header is invalid {}", error_kaomoji());
            return Err(miette::Error::new(err).with_source_code(header.to_owned()));
        }
    };

    println!("✅ Header is valid! {}", success_kaomoji());
    println!("keyId:     {}", signature_header.key_id);
    println!("algorithm: {}", signature_header.algorithm);
    println!("headers:   {}", signature_header.headers.join(" "));
    println!("signature: {}", signature_header.signature);

    Ok(())
}
