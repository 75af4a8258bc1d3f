use error_trail::{Code, GrpcCode};

#[test]
fn names_match_display() {
    for code in Code::ALL {
        assert_eq!(code.to_string(), code.as_str());
    }
    assert_eq!(Code::Unimplemented.to_string(), "not implemented");
    assert_eq!(Code::InvalidArgument.to_string(), "invalid argument");
    assert_eq!(Code::default(), Code::Unknown);
}

#[test]
fn http_statuses_translate_both_ways() {
    assert_eq!(Code::NotFound.to_http(), 404);
    assert_eq!(Code::Unauthenticated.to_http(), 401);
    assert_eq!(Code::Canceled.to_http(), 499);
    assert_eq!(Code::Unknown.to_http(), 500);

    assert_eq!(Code::from_http(404), Some(Code::NotFound));
    assert_eq!(Code::from_http(412), Some(Code::FailedPrecondition));
    assert_eq!(Code::from_http(500), Some(Code::Internal));
    assert_eq!(Code::from_http(504), Some(Code::DeadlineExceeded));
}

#[test]
fn success_and_unmapped_http_statuses_have_no_code() {
    assert_eq!(Code::from_http(200), None);
    assert_eq!(Code::from_http(204), None);
    assert_eq!(Code::from_http(418), None);
}

#[test]
fn grpc_translation_is_lossless() {
    for code in Code::ALL {
        assert_eq!(Code::from_grpc(code.to_grpc()), Some(code));
    }
    assert_eq!(Code::from_grpc(GrpcCode::Ok), None);
}

#[test]
fn grpc_codes_follow_wire_numbers() {
    assert_eq!(i32::from(GrpcCode::NotFound), 5);
    assert_eq!(GrpcCode::from(16), GrpcCode::Unauthenticated);
    assert_eq!(GrpcCode::from(0), GrpcCode::Ok);
    assert_eq!(GrpcCode::from(-3), GrpcCode::Unknown);
    assert_eq!(GrpcCode::from(99), GrpcCode::Unknown);
}

#[test]
fn code_serializes_as_its_name() {
    let json = serde_json::to_string(&Code::ResourceExhausted).unwrap();
    assert_eq!(json, "\"resource exhausted\"");
}
