use std::io::{BufRead, BufReader};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use talent_match::interview::{
    CandidateClient, ConnectPolicy, InterviewContext, InterviewError, InterviewSession,
    ProtocolError, QuestionPlan, ScriptedAnswers, SessionState,
};

fn sample_context() -> InterviewContext {
    InterviewContext {
        work_id: "work-7".into(),
        work_description: "a React dashboard".into(),
        candidate_username: "ada".into(),
        candidate_title: "Frontend Developer".into(),
        candidate_skills: vec!["React".into(), "CSS".into()],
        candidate_id: "c-1".into(),
        hourly_rate: 60.0,
        client_message: None,
    }
}

fn quick_policy(attempts: u32) -> ConnectPolicy {
    ConnectPolicy {
        attempts,
        retry_delay: Duration::from_millis(20),
        socket_timeout: Some(Duration::from_secs(5)),
    }
}

#[test]
fn full_exchange_over_loopback_scores_answers_and_closes() {
    let mut session = InterviewSession::default().with_read_timeout(Duration::from_secs(5));
    let addr = session.listen("127.0.0.1:0").expect("listener bound");
    assert_eq!(session.state(), SessionState::Listening);

    let candidate = thread::spawn(move || {
        let client = CandidateClient::connect("127.0.0.1", addr.port(), &quick_policy(3))
            .expect("candidate connects");
        let mut answers = ScriptedAnswers::new((0..6).map(|_| "a".repeat(50)));
        client.run(&QuestionPlan::new(), &mut answers)
    });

    session.accept().expect("candidate accepted");
    assert!(session.is_connected());

    let context = sample_context().with_client_message("  When can you start?  ");
    let results = session.conduct(&context).expect("interview completes");

    assert_eq!(session.state(), SessionState::Closed);
    assert!(!session.is_connected());
    assert_eq!(session.questions().len(), 6);
    assert_eq!(
        session.questions().last().map(String::as_str),
        Some("When can you start?")
    );
    assert_eq!(session.answers().len(), 6);
    assert_eq!(results.score, 3.0);
    assert_eq!(results.work_id, "work-7");
    assert_eq!(results.candidate_username, "ada");
    assert_eq!(results.questions_and_answers.len(), 6);
    assert_eq!(session.results(), Some(&results));

    let received = candidate
        .join()
        .expect("candidate thread")
        .expect("candidate receives results");
    assert_eq!(received, results);
}

#[test]
fn peer_disconnect_before_questions_closes_the_session() {
    let mut session = InterviewSession::default().with_read_timeout(Duration::from_secs(5));
    let addr = session.listen("127.0.0.1:0").expect("listener bound");

    let peer = thread::spawn(move || {
        let stream = TcpStream::connect(addr).expect("raw peer connects");
        let mut reader = BufReader::new(stream);
        let mut context = String::new();
        reader.read_line(&mut context).expect("context frame");
        context
    });

    session.accept().expect("peer accepted");
    session.send_context(&sample_context()).expect("context sent");

    let context_line = peer.join().expect("peer thread");
    assert!(context_line.contains("\"project_id\":\"work-7\""));
    assert!(context_line.contains("\"freelancer_username\":\"ada\""));

    let err = session.receive_questions().expect_err("peer went away");
    assert!(matches!(
        err,
        InterviewError::Protocol(ProtocolError::PeerClosed { .. })
    ));
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.results().is_none());
}

#[test]
fn connect_gives_up_after_configured_attempts() {
    let port = {
        let probe = TcpListener::bind("127.0.0.1:0").expect("probe bound");
        probe.local_addr().expect("probe addr").port()
    };

    let err = CandidateClient::connect("127.0.0.1", port, &quick_policy(2))
        .err()
        .expect("nobody is listening");
    assert!(matches!(err, InterviewError::Connect { attempts: 2, .. }));
}

#[test]
fn steps_out_of_order_are_rejected() {
    let mut session = InterviewSession::default();

    let err = session
        .send_context(&sample_context())
        .expect_err("not connected yet");
    assert!(matches!(
        err,
        InterviewError::InvalidState {
            state: SessionState::Idle,
            ..
        }
    ));
    assert!(matches!(
        session.accept(),
        Err(InterviewError::InvalidState { .. })
    ));

    session.listen("127.0.0.1:0").expect("listener bound");
    assert!(matches!(
        session.listen("127.0.0.1:0"),
        Err(InterviewError::InvalidState {
            state: SessionState::Listening,
            ..
        })
    ));

    session.close();
    session.close();
    assert_eq!(session.state(), SessionState::Closed);
}
