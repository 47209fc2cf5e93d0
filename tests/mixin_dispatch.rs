use std::thread;

use comet_trace::{
    garbage_collected, garbage_collected_mixin, mixin_anchor, trace_descriptor_of, Member,
    MixinAnchor, Trace, TraceDescriptor, TraceTrait, Visitor, VisitorTrait,
};

pub struct Leaf {
    next: Member<Leaf>,
}

impl Trace for Leaf {
    fn trace(&self, vis: &mut Visitor<'_>) {
        vis.trace_member(&self.next);
    }
}

pub struct Listener {
    anchor: MixinAnchor,
    target: Member<Leaf>,
}

impl Trace for Listener {
    fn trace(&self, vis: &mut Visitor<'_>) {
        vis.trace_member(&self.target);
    }
}

#[repr(C)]
pub struct Widget {
    id: u64,
    listener: Listener,
}

impl Trace for Widget {
    fn trace(&self, vis: &mut Visitor<'_>) {
        vis.trace_ref(&self.listener);
    }
}

garbage_collected!(Leaf, Widget);
garbage_collected_mixin!(Listener => anchor);

fn widget(target: Member<Leaf>) -> Box<Widget> {
    Box::new(Widget {
        id: 42,
        listener: Listener {
            anchor: unsafe { mixin_anchor!(Widget, listener) },
            target,
        },
    })
}

#[derive(Default)]
struct Collect(Vec<(usize, usize)>);

impl VisitorTrait for Collect {
    fn visit(&mut self, this: *const u8, descriptor: TraceDescriptor) {
        self.0
            .push((this as usize, descriptor.base_object_payload as usize));
    }
}

#[test]
fn member_to_mixin_reports_owner() {
    let leaf = Leaf {
        next: Member::null(),
    };
    let widget = widget(Member::new(&leaf));
    let member = Member::new(&widget.listener);

    let mut collect = Collect::default();
    member.trace(&mut Visitor::new(&mut collect));

    let listener = &widget.listener as *const Listener as usize;
    let owner = &*widget as *const Widget as usize;
    assert_eq!(collect.0, vec![(listener, owner)]);
    assert_eq!(widget.id, 42);
    assert!(leaf.next.is_null());
}

#[test]
fn concurrent_resolution_agrees() {
    let widget = widget(Member::null());
    let listener = &widget.listener as *const Listener as usize;
    let owner = &*widget as *const Widget as usize;

    let payloads: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(move || {
                    let descriptor =
                        unsafe { <Listener as TraceTrait>::get_trace_descriptor(listener as *const u8) };
                    descriptor.base_object_payload as usize
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(payloads.iter().all(|payload| *payload == owner));
    assert_eq!(
        trace_descriptor_of(&widget.listener),
        trace_descriptor_of(&*widget)
    );
}
